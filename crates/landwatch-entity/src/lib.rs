//! # landwatch-entity
//!
//! Entity models for LandWatch. The `record` module holds the raw rows of
//! the three sources (each deriving `sqlx::FromRow`); the `alert` and
//! `notification` modules hold the normalized value objects the engine
//! derives from them. Value objects have no identity beyond their
//! derivation and are recomputed on every fetch cycle.

pub mod alert;
pub mod notification;
pub mod record;

pub use alert::{Alert, AlertPriority, AlertSource, AlertStats, AlertStatus, SeriesBucket};
pub use notification::{NotificationState, TrackerPhase, VisitState};
pub use record::{FieldReport, LicenseRecord, LicenseStatus, SatelliteReport};
