//! Aggregate counts and time-bucketed series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::source::AlertSource;

/// Aggregate counts over one normalized alert collection.
///
/// `total == satellite + community + system` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStats {
    /// All alerts.
    pub total: u64,
    /// Alerts from satellite analysis.
    pub satellite: u64,
    /// Alerts from community field reports.
    pub community: u64,
    /// Alerts from the license registry.
    pub system: u64,
    /// High-priority alerts.
    pub high_priority: u64,
    /// Alerts whose status is `new`.
    pub new_alerts: u64,
}

impl AlertStats {
    /// Count one alert from `source`.
    pub fn record(&mut self, source: AlertSource) {
        self.total += 1;
        match source {
            AlertSource::Satellite => self.satellite += 1,
            AlertSource::Report => self.community += 1,
            AlertSource::System => self.system += 1,
        }
    }

    /// Check the per-source breakdown adds up to the total.
    pub fn is_consistent(&self) -> bool {
        self.total == self.satellite + self.community + self.system
    }
}

/// One bucket of a weekly or monthly chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesBucket {
    /// Weekday or month name.
    pub label: String,
    /// Start of the bucket.
    pub start: DateTime<Utc>,
    /// All alerts in the bucket.
    pub total: u64,
    /// Satellite alerts in the bucket.
    pub satellite: u64,
    /// Community alerts in the bucket.
    pub community: u64,
    /// License-registry alerts in the bucket.
    pub system: u64,
}

impl SeriesBucket {
    /// Create an empty bucket.
    pub fn new(label: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            start,
            total: 0,
            satellite: 0,
            community: 0,
            system: 0,
        }
    }

    /// Count one alert from `source`.
    pub fn record(&mut self, source: AlertSource) {
        self.total += 1;
        match source {
            AlertSource::Satellite => self.satellite += 1,
            AlertSource::Report => self.community += 1,
            AlertSource::System => self.system += 1,
        }
    }
}
