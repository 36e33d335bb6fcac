//! Notification tracker configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Trailing windows and queue sizing for the notification tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Trailing window, in hours, for the "new" counter.
    #[serde(default = "default_new_window_hours")]
    pub new_window_hours: u32,
    /// Trailing window, in days, in which an active license still alerts.
    #[serde(default = "default_license_active_window_days")]
    pub license_active_window_days: u32,
    /// Capacity of the recomputation trigger queue.
    #[serde(default = "default_trigger_buffer")]
    pub trigger_buffer: usize,
    /// Periodic refresh interval in seconds (0 disables it).
    #[serde(default)]
    pub refresh_interval_seconds: u64,
}

impl NotificationConfig {
    /// The "new" trailing window.
    pub fn new_window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.new_window_hours))
    }

    /// The "recently active license" trailing window.
    pub fn license_active_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.license_active_window_days))
    }

    /// The periodic refresh interval, if enabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_seconds > 0)
            .then(|| Duration::from_secs(self.refresh_interval_seconds))
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            new_window_hours: default_new_window_hours(),
            license_active_window_days: default_license_active_window_days(),
            trigger_buffer: default_trigger_buffer(),
            refresh_interval_seconds: 0,
        }
    }
}

fn default_new_window_hours() -> u32 {
    24
}

fn default_license_active_window_days() -> u32 {
    7
}

fn default_trigger_buffer() -> usize {
    64
}
