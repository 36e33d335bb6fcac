//! Domain events consumed by the alert engine.
//!
//! Source adapters emit an [`InsertEvent`] for every new row. The
//! notification tracker fans these in from all three sources and treats
//! each one as a recomputation trigger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::source::SourceKind;

/// A new record appeared in one of the sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertEvent {
    /// The source the record was inserted into.
    pub source: SourceKind,
    /// Primary key of the inserted record, when the source reports it.
    pub record_id: Option<String>,
    /// When the adapter observed the insert.
    pub received_at: DateTime<Utc>,
}

impl InsertEvent {
    /// Create a new insert event stamped with the current time.
    pub fn new(source: SourceKind, record_id: Option<String>) -> Self {
        Self {
            source,
            record_id,
            received_at: Utc::now(),
        }
    }
}
