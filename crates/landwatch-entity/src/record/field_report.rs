//! User-submitted field report row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use landwatch_core::traits::SourceRecord;
use landwatch_core::types::SourceKind;

/// A report submitted by a community member in the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FieldReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// Free-text description written by the reporter.
    pub description: Option<String>,
    /// Free-text location written by the reporter.
    pub location: Option<String>,
    /// Administrative district, if the reporter picked one.
    pub district: Option<String>,
    /// Reported latitude.
    pub latitude: Option<f64>,
    /// Reported longitude.
    pub longitude: Option<f64>,
    /// Attached photo.
    pub image_url: Option<String>,
    /// When the report was submitted.
    pub created_at: DateTime<Utc>,
}

impl SourceRecord for FieldReport {
    const SOURCE: SourceKind = SourceKind::FieldReport;

    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
