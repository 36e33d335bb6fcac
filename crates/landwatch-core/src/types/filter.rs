//! Record filters passed to source adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Narrows a source query or count.
///
/// Time filtering always uses the record's creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only records created at or after this instant.
    pub created_since: Option<DateTime<Utc>>,
    /// Maximum number of rows to return (ignored by counts).
    pub limit: Option<u32>,
}

impl RecordFilter {
    /// A filter that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Records created at or after `since`.
    pub fn created_since(since: DateTime<Utc>) -> Self {
        Self {
            created_since: Some(since),
            limit: None,
        }
    }

    /// Cap the number of returned rows.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a record created at `created_at` passes the time bound.
    pub fn matches(&self, created_at: DateTime<Utc>) -> bool {
        self.created_since.is_none_or(|since| created_at >= since)
    }
}
