//! Normalized alert model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::priority::AlertPriority;
use super::source::AlertSource;
use super::status::AlertStatus;

/// A source record mapped into the uniform alert shape.
///
/// `id` is positional within one normalization pass (`S01`, `C01`,
/// `LIC-001`) and is not stable across fetches. `record_id` carries the
/// source row's own primary key for consumers that need stability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Positional display identifier.
    pub id: String,
    /// Primary key of the source row.
    pub record_id: String,
    /// Human-readable summary.
    pub description: String,
    /// Human-readable location.
    pub location: String,
    /// Which source produced the alert.
    pub source: AlertSource,
    /// Creation or last-update time of the source row.
    pub occurred_at: DateTime<Utc>,
    /// Derived status.
    pub status: AlertStatus,
    /// Derived priority.
    pub priority: AlertPriority,
    /// Administrative district.
    pub district: Option<String>,
    /// Spectral index used by a satellite analysis.
    pub analysis_type: Option<String>,
    /// Illegal-activity flag of a satellite analysis.
    pub is_illegal: Option<bool>,
    /// Area of detected change.
    pub change_area_km2: Option<f64>,
    /// Imagery before the change.
    pub before_image_url: Option<String>,
    /// Imagery after the change.
    pub after_image_url: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
}

impl Alert {
    /// Whether the alert is high priority.
    pub fn is_high_priority(&self) -> bool {
        self.priority == AlertPriority::High
    }

    /// Whether the alert still needs attention.
    pub fn is_new(&self) -> bool {
        self.status == AlertStatus::New
    }
}
