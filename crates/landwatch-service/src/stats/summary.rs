//! Alert collection → `AlertStats` reduction.

use landwatch_entity::alert::{Alert, AlertStats};

/// Reduce a normalized alert collection into aggregate counts.
pub fn compute_stats(alerts: &[Alert]) -> AlertStats {
    alerts.iter().fold(AlertStats::default(), |mut stats, alert| {
        stats.record(alert.source);
        if alert.is_high_priority() {
            stats.high_priority += 1;
        }
        if alert.is_new() {
            stats.new_alerts += 1;
        }
        stats
    })
}
