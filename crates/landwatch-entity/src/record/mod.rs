//! Raw rows as stored by the three sources.

pub mod field_report;
pub mod license;
pub mod satellite;

pub use field_report::FieldReport;
pub use license::{LicenseRecord, LicenseStatus};
pub use satellite::SatelliteReport;
