//! # landwatch-service
//!
//! Alert logic for LandWatch. Turns raw source rows into normalized
//! alerts, filters and summarizes them, and records user visits.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod alert;
pub mod stats;
pub mod visit;

pub use alert::{AlertNormalizer, AlertService, SourceBatch, SourceFilter, filter_alerts};
pub use stats::{compute_stats, monthly_series, weekly_series};
pub use visit::{VisitOutcome, VisitRecorder};
