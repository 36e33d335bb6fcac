//! Visit recording and watermark persistence tests.

use std::sync::Arc;

use chrono::{Duration, Utc};

use landwatch_cache::file::FileWatermarkStore;
use landwatch_cache::keys;
use landwatch_cache::memory::MemoryWatermarkStore;
use landwatch_core::config::AppConfig;
use landwatch_core::error::ErrorKind;
use landwatch_core::traits::WatermarkStore;
use landwatch_database::sources::{MemorySource, SourceSet};
use landwatch_entity::record::{FieldReport, LicenseRecord};
use landwatch_realtime::AlertEngine;

use crate::helpers::{TestEngine, satellite_at};

#[tokio::test]
async fn test_visit_persists_watermark() {
    let t = TestEngine::new(vec![satellite_at(Utc::now(), true)], Vec::new(), Vec::new());
    t.engine.start().await.unwrap();

    let outcome = t.engine.mark_visited().await;
    assert!(outcome.persisted);
    assert_eq!(
        t.watermarks.get(keys::alerts_last_visited()).await.unwrap(),
        Some(outcome.visited_at)
    );

    let again = t.engine.mark_visited().await;
    assert!(again.visited_at >= outcome.visited_at);
    assert_eq!(t.engine.get_notification_state().unvisited_alerts, 0);

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_unwritable_store_still_zeroes_counter() {
    let t = TestEngine::new(
        vec![satellite_at(Utc::now() - Duration::minutes(1), true)],
        Vec::new(),
        Vec::new(),
    );
    t.engine.start().await.unwrap();
    t.watermarks.set_read_only(true);

    let outcome = t.engine.mark_visited().await;
    assert!(!outcome.persisted);
    assert_eq!(
        outcome.warning.as_ref().map(|w| w.kind),
        Some(ErrorKind::PersistenceFailure)
    );
    assert_eq!(t.engine.get_notification_state().unvisited_alerts, 0);

    // the in-memory visit outlives the failed write
    let state = t.engine.refresh().await;
    assert_eq!(state.unvisited_alerts, 0);
    assert_eq!(state.last_visited, Some(outcome.visited_at));

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_existing_watermark_is_read_on_start() {
    let now = Utc::now();
    let watermarks = MemoryWatermarkStore::new();
    watermarks
        .set(keys::alerts_last_visited(), now - Duration::hours(2))
        .await
        .unwrap();

    let t = TestEngine::with_watermarks(
        vec![
            satellite_at(now - Duration::hours(5), true),
            satellite_at(now - Duration::hours(1), false),
        ],
        Vec::new(),
        Vec::new(),
        watermarks,
    );
    t.engine.start().await.unwrap();

    let state = t.engine.get_notification_state();
    assert_eq!(state.total_alerts, 2);
    assert_eq!(state.unvisited_alerts, 1);
    assert_eq!(state.last_visited, Some(now - Duration::hours(2)));

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_file_watermark_survives_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session").join("watermarks.json");
    let now = Utc::now();

    let engine_over = |store: Arc<dyn WatermarkStore>| {
        let sources = SourceSet::new(
            Arc::new(MemorySource::with_rows(vec![satellite_at(
                now - Duration::hours(3),
                true,
            )])),
            Arc::new(MemorySource::<FieldReport>::new()),
            Arc::new(MemorySource::<LicenseRecord>::new()),
        );
        AlertEngine::new(sources, store, &AppConfig::default())
    };

    let first = engine_over(Arc::new(FileWatermarkStore::new(&path)));
    first.start().await.unwrap();
    assert_eq!(first.get_notification_state().unvisited_alerts, 1);
    let outcome = first.mark_visited().await;
    assert!(outcome.persisted);
    first.shutdown().await;

    let second = engine_over(Arc::new(FileWatermarkStore::new(&path)));
    second.start().await.unwrap();
    let state = second.get_notification_state();
    assert_eq!(state.last_visited, Some(outcome.visited_at));
    assert_eq!(state.unvisited_alerts, 0);
    second.shutdown().await;
}
