//! Source selection and free-text search over normalized alerts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use landwatch_core::error::AppError;
use landwatch_entity::alert::{Alert, AlertSource};

/// Source selector offered by the alert list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    /// Every source.
    #[default]
    All,
    /// Satellite alerts only.
    Satellite,
    /// Community field reports only.
    Community,
    /// License-registry alerts only.
    System,
}

impl SourceFilter {
    /// Whether alerts from `source` pass this selector.
    pub fn matches(&self, source: AlertSource) -> bool {
        match self {
            Self::All => true,
            Self::Satellite => source == AlertSource::Satellite,
            Self::Community => source == AlertSource::Report,
            Self::System => source == AlertSource::System,
        }
    }

    /// Return the selector as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Satellite => "satellite",
            Self::Community => "community",
            Self::System => "system",
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "satellite" => Ok(Self::Satellite),
            "community" => Ok(Self::Community),
            "system" => Ok(Self::System),
            _ => Err(AppError::validation(format!(
                "Invalid source filter: '{s}'. Expected one of: all, satellite, community, system"
            ))),
        }
    }
}

/// Narrow `alerts` by source, then by a case-insensitive substring query.
///
/// The query matches if any of description, location, id, district, or
/// analysis type contains it. A blank query matches everything. Input order
/// is preserved.
pub fn filter_alerts(alerts: &[Alert], query: &str, source: SourceFilter) -> Vec<Alert> {
    let needle = query.trim().to_lowercase();

    alerts
        .iter()
        .filter(|alert| source.matches(alert.source))
        .filter(|alert| needle.is_empty() || matches_query(alert, &needle))
        .cloned()
        .collect()
}

fn matches_query(alert: &Alert, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&alert.description)
        || contains(&alert.location)
        || contains(&alert.id)
        || alert.district.as_deref().is_some_and(contains)
        || alert.analysis_type.as_deref().is_some_and(contains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use landwatch_entity::alert::{AlertPriority, AlertStatus};

    fn alert(id: &str, source: AlertSource, description: &str, district: Option<&str>) -> Alert {
        Alert {
            id: id.to_string(),
            record_id: id.to_lowercase(),
            description: description.to_string(),
            location: "Western Region".to_string(),
            source,
            occurred_at: Utc::now(),
            status: AlertStatus::New,
            priority: AlertPriority::Medium,
            district: district.map(str::to_string),
            analysis_type: (source == AlertSource::Satellite).then(|| "BSI".to_string()),
            is_illegal: None,
            change_area_km2: None,
            before_image_url: None,
            after_image_url: None,
            latitude: None,
            longitude: None,
        }
    }

    fn sample() -> Vec<Alert> {
        vec![
            alert("S01", AlertSource::Satellite, "Illegal mining detected - BSI", Some("Tarkwa")),
            alert("C01", AlertSource::Report, "Excavators by the river", Some("Prestea")),
            alert("LIC-001", AlertSource::System, "License expired for Ayanfuri Gold", None),
        ]
    }

    #[test]
    fn test_all_with_empty_query_returns_everything() {
        let alerts = sample();
        assert_eq!(filter_alerts(&alerts, "", SourceFilter::All), alerts);
        assert_eq!(filter_alerts(&alerts, "   ", SourceFilter::All), alerts);
    }

    #[test]
    fn test_source_selector() {
        let alerts = sample();
        let community = filter_alerts(&alerts, "", SourceFilter::Community);
        assert_eq!(community.len(), 1);
        assert_eq!(community[0].id, "C01");

        let system = filter_alerts(&alerts, "", SourceFilter::System);
        assert_eq!(system[0].id, "LIC-001");
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let alerts = sample();
        assert_eq!(filter_alerts(&alerts, "tarkwa", SourceFilter::All)[0].id, "S01");
        assert_eq!(filter_alerts(&alerts, "RIVER", SourceFilter::All)[0].id, "C01");
        assert_eq!(filter_alerts(&alerts, "lic-0", SourceFilter::All)[0].id, "LIC-001");
        assert_eq!(filter_alerts(&alerts, "bsi", SourceFilter::All).len(), 1);
        assert_eq!(filter_alerts(&alerts, "western", SourceFilter::All).len(), 3);
    }

    #[test]
    fn test_source_and_query_compose() {
        let alerts = sample();
        assert!(filter_alerts(&alerts, "tarkwa", SourceFilter::Community).is_empty());
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!("Community".parse::<SourceFilter>().unwrap(), SourceFilter::Community);
        assert_eq!("".parse::<SourceFilter>().unwrap(), SourceFilter::All);
        assert!("drone".parse::<SourceFilter>().is_err());
    }
}
