//! Aggregate statistics and chart series over normalized alerts.

pub mod series;
pub mod summary;

pub use series::{MONTHLY_BUCKETS, WEEKLY_BUCKETS, monthly_series, weekly_series};
pub use summary::compute_stats;
