//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use landwatch_cache::memory::MemoryWatermarkStore;
use landwatch_core::config::AppConfig;
use landwatch_core::traits::WatermarkStore;
use landwatch_database::sources::{MemorySource, SourceSet};
use landwatch_entity::notification::NotificationState;
use landwatch_entity::record::{FieldReport, LicenseRecord, SatelliteReport};
use landwatch_realtime::AlertEngine;

/// How long to wait for the worker to publish a state.
const STATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Engine over memory sources the test can insert into and break.
pub struct TestEngine {
    /// The engine under test.
    pub engine: AlertEngine,
    /// Satellite source.
    pub satellite: Arc<MemorySource<SatelliteReport>>,
    /// Field-report source.
    pub reports: Arc<MemorySource<FieldReport>>,
    /// License-registry source.
    pub licenses: Arc<MemorySource<LicenseRecord>>,
    /// Session watermark store.
    pub watermarks: Arc<MemoryWatermarkStore>,
}

impl TestEngine {
    /// Build an engine with the given rows and a fresh watermark store.
    pub fn new(
        satellite: Vec<SatelliteReport>,
        reports: Vec<FieldReport>,
        licenses: Vec<LicenseRecord>,
    ) -> Self {
        Self::with_watermarks(satellite, reports, licenses, MemoryWatermarkStore::new())
    }

    /// Build an engine over an existing watermark store.
    pub fn with_watermarks(
        satellite: Vec<SatelliteReport>,
        reports: Vec<FieldReport>,
        licenses: Vec<LicenseRecord>,
        watermarks: MemoryWatermarkStore,
    ) -> Self {
        let satellite = Arc::new(MemorySource::with_rows(satellite));
        let reports = Arc::new(MemorySource::with_rows(reports));
        let licenses = Arc::new(MemorySource::with_rows(licenses));
        let watermarks = Arc::new(watermarks);

        let sources = SourceSet::new(satellite.clone(), reports.clone(), licenses.clone());
        let store: Arc<dyn WatermarkStore> = watermarks.clone();
        let engine = AlertEngine::new(sources, store, &AppConfig::default());

        Self {
            engine,
            satellite,
            reports,
            licenses,
            watermarks,
        }
    }

    /// Wait until the published state satisfies `predicate`.
    pub async fn wait_for_state(
        &self,
        mut predicate: impl FnMut(&NotificationState) -> bool,
    ) -> NotificationState {
        let mut states: watch::Receiver<NotificationState> = self.engine.subscribe_state();
        let state = tokio::time::timeout(STATE_TIMEOUT, states.wait_for(|s| predicate(s)))
            .await
            .expect("timed out waiting for notification state")
            .expect("notification state channel closed");
        state.clone()
    }
}

/// A satellite report created at `created_at`.
pub fn satellite_at(created_at: DateTime<Utc>, illegal: bool) -> SatelliteReport {
    SatelliteReport {
        id: Uuid::new_v4(),
        district: Some("Tarkwa".to_string()),
        analysis_type: Some("BSI".to_string()),
        is_illegal: Some(illegal),
        change_area_km2: Some(0.8),
        before_image_url: Some("https://imagery.example/before.png".to_string()),
        after_image_url: Some("https://imagery.example/after.png".to_string()),
        latitude: Some(5.3),
        longitude: Some(-1.99),
        created_at,
    }
}

/// A community field report created at `created_at`.
pub fn report_at(created_at: DateTime<Utc>) -> FieldReport {
    FieldReport {
        id: Uuid::new_v4(),
        description: Some("Excavators working along the riverbank".to_string()),
        location: Some("Ankobra river".to_string()),
        district: Some("Prestea-Huni Valley".to_string()),
        latitude: None,
        longitude: None,
        image_url: None,
        created_at,
    }
}

/// A license record in `status`, last changed at `updated_at`.
pub fn license_at(status: &str, updated_at: DateTime<Utc>) -> LicenseRecord {
    LicenseRecord {
        id: Uuid::new_v4(),
        company_name: Some("Ayanfuri Gold Ltd".to_string()),
        license_number: Some("SML-2024-117".to_string()),
        status: Some(status.to_string()),
        location: Some("Ayanfuri".to_string()),
        district: Some("Upper Denkyira West".to_string()),
        created_at: updated_at - chrono::Duration::days(30),
        updated_at: Some(updated_at),
    }
}
