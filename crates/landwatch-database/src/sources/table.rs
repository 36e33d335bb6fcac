//! Table metadata for the PostgreSQL-backed sources.

use landwatch_entity::record::{FieldReport, LicenseRecord, SatelliteReport};

/// Where a source row type lives in PostgreSQL.
pub trait SourceTable {
    /// Table name.
    const TABLE: &'static str;

    /// `pg_notify` channel fired by the table's insert trigger.
    fn notify_channel() -> String {
        format!("{}_inserted", Self::TABLE)
    }
}

impl SourceTable for SatelliteReport {
    const TABLE: &'static str = "satellite_reports";
}

impl SourceTable for FieldReport {
    const TABLE: &'static str = "field_reports";
}

impl SourceTable for LicenseRecord {
    const TABLE: &'static str = "license_records";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_channels_match_trigger_naming() {
        assert_eq!(
            SatelliteReport::notify_channel(),
            "satellite_reports_inserted"
        );
        assert_eq!(FieldReport::notify_channel(), "field_reports_inserted");
        assert_eq!(LicenseRecord::notify_channel(), "license_records_inserted");
    }
}
