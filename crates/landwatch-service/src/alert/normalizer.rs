//! Per-source derivation of normalized alerts.
//!
//! Every rule here is a pure function of one source row (plus the clock for
//! the license activity window), so rows can be normalized independently.
//! Missing or blank fields are replaced with placeholders; normalization
//! never fails.

use chrono::{DateTime, Duration, Utc};

use landwatch_entity::alert::{Alert, AlertPriority, AlertSource, AlertStatus};
use landwatch_entity::record::{FieldReport, LicenseRecord, LicenseStatus, SatelliteReport};

/// Analysis type assumed when a satellite report does not name one.
pub const DEFAULT_ANALYSIS_TYPE: &str = "NDVI";
/// District shown when a satellite report has none.
pub const UNKNOWN_DISTRICT: &str = "Unknown";
/// Location shown when a row carries no usable location.
pub const UNKNOWN_LOCATION: &str = "Unknown location";
/// Company shown when a license row has no company name.
pub const UNKNOWN_COMPANY: &str = "Unknown company";
/// Description used for field reports with a blank description.
pub const DEFAULT_REPORT_DESCRIPTION: &str = "Community mining report";

/// Raw rows of one fetch cycle.
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    /// Satellite reports.
    pub satellite: Vec<SatelliteReport>,
    /// Community field reports.
    pub field_reports: Vec<FieldReport>,
    /// License-registry rows.
    pub licenses: Vec<LicenseRecord>,
}

impl SourceBatch {
    /// Total number of raw rows.
    pub fn len(&self) -> usize {
        self.satellite.len() + self.field_reports.len() + self.licenses.len()
    }

    /// Whether the batch holds no rows at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps raw rows into [`Alert`]s.
#[derive(Debug, Clone)]
pub struct AlertNormalizer {
    /// How long after activation an active license still produces an alert.
    active_license_window: Duration,
}

impl Default for AlertNormalizer {
    fn default() -> Self {
        Self::new(Duration::days(7))
    }
}

impl AlertNormalizer {
    /// Create a normalizer with the given active-license window.
    pub fn new(active_license_window: Duration) -> Self {
        Self {
            active_license_window,
        }
    }

    /// Normalize a whole batch.
    ///
    /// Output order is satellite, then field reports, then licenses, each in
    /// input order. License rows may be suppressed, so the output can be
    /// shorter than the batch.
    pub fn normalize(&self, batch: &SourceBatch, now: DateTime<Utc>) -> Vec<Alert> {
        let satellite = batch
            .satellite
            .iter()
            .enumerate()
            .map(|(i, r)| self.satellite(i, r));
        let reports = batch
            .field_reports
            .iter()
            .enumerate()
            .map(|(i, r)| self.field_report(i, r));
        let licenses = batch
            .licenses
            .iter()
            .enumerate()
            .filter_map(|(i, r)| self.license(i, r, now));

        satellite.chain(reports).chain(licenses).collect()
    }

    /// Normalize the satellite report at `index` in its batch.
    pub fn satellite(&self, index: usize, report: &SatelliteReport) -> Alert {
        let analysis_type =
            non_blank(report.analysis_type.as_deref()).unwrap_or(DEFAULT_ANALYSIS_TYPE);
        let district = non_blank(report.district.as_deref()).unwrap_or(UNKNOWN_DISTRICT);
        let illegal = report.flagged_illegal();

        let (status, priority, description) = if illegal {
            (
                AlertStatus::New,
                AlertPriority::High,
                format!("Illegal mining detected - {analysis_type}"),
            )
        } else {
            (
                AlertStatus::Resolved,
                AlertPriority::Medium,
                format!("Mining analysis completed - {analysis_type}"),
            )
        };

        Alert {
            id: format!("S{:02}", index + 1),
            record_id: report.id.to_string(),
            description,
            location: district.to_string(),
            source: AlertSource::Satellite,
            occurred_at: report.created_at,
            status,
            priority,
            district: Some(district.to_string()),
            analysis_type: Some(analysis_type.to_string()),
            is_illegal: Some(illegal),
            change_area_km2: report.change_area_km2,
            before_image_url: report.before_image_url.clone(),
            after_image_url: report.after_image_url.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
        }
    }

    /// Normalize the field report at `index` in its batch.
    pub fn field_report(&self, index: usize, report: &FieldReport) -> Alert {
        let description =
            non_blank(report.description.as_deref()).unwrap_or(DEFAULT_REPORT_DESCRIPTION);
        let location = non_blank(report.location.as_deref())
            .or_else(|| non_blank(report.district.as_deref()))
            .unwrap_or(UNKNOWN_LOCATION);

        Alert {
            id: format!("C{:02}", index + 1),
            record_id: report.id.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            source: AlertSource::Report,
            occurred_at: report.created_at,
            status: AlertStatus::New,
            priority: AlertPriority::Medium,
            district: non_blank(report.district.as_deref()).map(str::to_string),
            analysis_type: None,
            is_illegal: None,
            change_area_km2: None,
            before_image_url: None,
            after_image_url: report.image_url.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
        }
    }

    /// Normalize the license row at `index` in its batch.
    ///
    /// Returns `None` for an active license whose last transition is older
    /// than the active-license window.
    pub fn license(
        &self,
        index: usize,
        record: &LicenseRecord,
        now: DateTime<Utc>,
    ) -> Option<Alert> {
        let company = non_blank(record.company_name.as_deref()).unwrap_or(UNKNOWN_COMPANY);
        let occurred_at = record.last_transition_at();

        let (status, priority, description) = match record.lifecycle() {
            LicenseStatus::Pending => (
                AlertStatus::New,
                AlertPriority::High,
                format!("New license application from {company}"),
            ),
            LicenseStatus::Active => {
                if occurred_at < now - self.active_license_window {
                    return None;
                }
                (
                    AlertStatus::Resolved,
                    AlertPriority::Medium,
                    format!("License activated for {company}"),
                )
            }
            LicenseStatus::Expired => (
                AlertStatus::New,
                AlertPriority::High,
                format!("License expired for {company}"),
            ),
            LicenseStatus::Revoked => (
                AlertStatus::Resolved,
                AlertPriority::High,
                format!("License revoked for {company}"),
            ),
            LicenseStatus::Other(_) => (
                AlertStatus::InProgress,
                AlertPriority::Medium,
                format!("License status update for {company}"),
            ),
        };

        let location = non_blank(record.location.as_deref())
            .or_else(|| non_blank(record.district.as_deref()))
            .unwrap_or(UNKNOWN_LOCATION);

        Some(Alert {
            id: format!("LIC-{:03}", index + 1),
            record_id: record.id.to_string(),
            description,
            location: location.to_string(),
            source: AlertSource::System,
            occurred_at,
            status,
            priority,
            district: non_blank(record.district.as_deref()).map(str::to_string),
            analysis_type: None,
            is_illegal: None,
            change_area_km2: None,
            before_image_url: None,
            after_image_url: None,
            latitude: None,
            longitude: None,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
