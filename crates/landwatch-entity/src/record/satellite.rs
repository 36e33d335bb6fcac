//! Satellite change-detection report row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use landwatch_core::traits::SourceRecord;
use landwatch_core::types::SourceKind;

/// An automated change-detection result for one area of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SatelliteReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// Administrative district the analysis covers.
    pub district: Option<String>,
    /// Spectral index used (e.g. `NDVI`, `BSI`).
    pub analysis_type: Option<String>,
    /// Whether the detected change was classified as illegal mining.
    pub is_illegal: Option<bool>,
    /// Area of detected change in square kilometres.
    pub change_area_km2: Option<f64>,
    /// Imagery before the change.
    pub before_image_url: Option<String>,
    /// Imagery after the change.
    pub after_image_url: Option<String>,
    /// Centroid latitude.
    pub latitude: Option<f64>,
    /// Centroid longitude.
    pub longitude: Option<f64>,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
}

impl SatelliteReport {
    /// Whether the report flags illegal activity. Missing means no.
    pub fn flagged_illegal(&self) -> bool {
        self.is_illegal.unwrap_or(false)
    }
}

impl SourceRecord for SatelliteReport {
    const SOURCE: SourceKind = SourceKind::Satellite;

    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
