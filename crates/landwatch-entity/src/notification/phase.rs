//! Notification tracker lifecycle phase.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a notification tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerPhase {
    /// No counting query has completed yet.
    Uninitialized,
    /// Counters reflect at least one completed recomputation.
    Ready,
}

impl TrackerPhase {
    /// Return the phase as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
        }
    }
}
