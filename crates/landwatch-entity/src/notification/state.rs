//! Live notification counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the live counters for one session.
///
/// Always replaced as a whole; never mutated field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationState {
    /// Source records across all three sources.
    pub total_alerts: u64,
    /// Source records created within the trailing "new" window.
    pub new_alerts: u64,
    /// Source records created at or after `last_visited`, or all of them
    /// if the user never visited.
    pub unvisited_alerts: u64,
    /// When the counters were last recomputed.
    pub last_checked: Option<DateTime<Utc>>,
    /// When the user last opened the alert view.
    pub last_visited: Option<DateTime<Utc>>,
}

/// Three-way view of the unseen counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisitState {
    /// The alert view was never opened; everything counts as unseen.
    NeverVisited {
        /// Every record.
        unseen: u64,
    },
    /// Visited and nothing arrived since.
    UpToDate {
        /// Last visit.
        visited_at: DateTime<Utc>,
    },
    /// Visited and `unseen` records arrived since.
    Unseen {
        /// Last visit.
        visited_at: DateTime<Utc>,
        /// Records since the visit.
        unseen: u64,
    },
}

impl NotificationState {
    /// Classify the unseen counter.
    pub fn visit_state(&self) -> VisitState {
        match self.last_visited {
            None => VisitState::NeverVisited {
                unseen: self.unvisited_alerts,
            },
            Some(visited_at) if self.unvisited_alerts == 0 => VisitState::UpToDate { visited_at },
            Some(visited_at) => VisitState::Unseen {
                visited_at,
                unseen: self.unvisited_alerts,
            },
        }
    }

    /// The state right after a visit at `at`: unseen collapses to zero.
    pub fn visited(&self, at: DateTime<Utc>) -> Self {
        Self {
            total_alerts: self.total_alerts,
            new_alerts: self.new_alerts,
            unvisited_alerts: 0,
            last_checked: self.last_checked,
            last_visited: Some(at),
        }
    }
}
