//! Live counter tests.

use chrono::{Duration, Utc};
use futures::future::join_all;

use landwatch_entity::notification::{TrackerPhase, VisitState};

use crate::helpers::{TestEngine, license_at, report_at, satellite_at};

fn five_three_two() -> TestEngine {
    let now = Utc::now();
    TestEngine::new(
        (0..5).map(|i| satellite_at(now - Duration::days(i), true)).collect(),
        (0..3).map(|i| report_at(now - Duration::hours(i * 30))).collect(),
        vec![
            license_at("pending", now - Duration::days(2)),
            license_at("active", now - Duration::days(40)),
        ],
    )
}

#[tokio::test]
async fn test_never_visited_counts_everything() {
    let t = five_three_two();
    assert_eq!(t.engine.phase(), TrackerPhase::Uninitialized);

    t.engine.start().await.unwrap();

    let state = t.engine.get_notification_state();
    assert_eq!(t.engine.phase(), TrackerPhase::Ready);
    assert_eq!(state.total_alerts, 10);
    assert_eq!(state.unvisited_alerts, 10);
    assert_eq!(state.last_visited, None);
    assert_eq!(
        t.engine.visit_state(),
        VisitState::NeverVisited { unseen: 10 }
    );

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_new_counter_uses_trailing_day() {
    let t = five_three_two();
    t.engine.start().await.unwrap();

    // satellite at 0 days, report at 0 hours
    assert_eq!(t.engine.get_notification_state().new_alerts, 2);

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_insert_after_visit_counts_one_unvisited() {
    let t = five_three_two();
    t.engine.start().await.unwrap();

    let outcome = t.engine.mark_visited().await;
    assert!(outcome.persisted);
    assert_eq!(t.engine.get_notification_state().unvisited_alerts, 0);

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    t.satellite.insert(satellite_at(Utc::now(), true)).await;

    let state = t.wait_for_state(|s| s.total_alerts == 11).await;
    assert_eq!(state.unvisited_alerts, 1);
    assert_eq!(
        t.engine.visit_state(),
        VisitState::Unseen {
            visited_at: outcome.visited_at,
            unseen: 1
        }
    );

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_inserts_from_every_source_trigger_recompute() {
    let t = TestEngine::new(Vec::new(), Vec::new(), Vec::new());
    t.engine.start().await.unwrap();

    let now = Utc::now();
    t.satellite.insert(satellite_at(now, false)).await;
    t.reports.insert(report_at(now)).await;
    t.licenses.insert(license_at("expired", now)).await;

    let state = t.wait_for_state(|s| s.total_alerts == 3).await;
    assert_eq!(state.unvisited_alerts, 3);

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_visit_then_refresh_stays_zero() {
    let t = five_three_two();
    t.engine.start().await.unwrap();

    t.engine.mark_visited().await;
    let state = t.engine.refresh().await;
    assert_eq!(state.unvisited_alerts, 0);
    assert_eq!(state.total_alerts, 10);
    assert!(matches!(
        t.engine.visit_state(),
        VisitState::UpToDate { .. }
    ));

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_failed_source_counts_as_zero() {
    let t = five_three_two();
    t.satellite.set_unavailable(true);
    t.engine.start().await.unwrap();

    let state = t.engine.get_notification_state();
    assert_eq!(state.total_alerts, 5);
    assert_eq!(state.unvisited_alerts, 5);

    t.satellite.set_unavailable(false);
    let state = t.engine.refresh().await;
    assert_eq!(state.total_alerts, 10);

    t.engine.shutdown().await;
}

#[tokio::test]
async fn test_state_is_never_torn_under_concurrent_refreshes() {
    let t = five_three_two();
    t.engine.start().await.unwrap();

    let states = join_all((0..8).map(|_| t.engine.refresh())).await;
    for state in states {
        assert_eq!(state.total_alerts, 10);
        assert_eq!(state.unvisited_alerts, 10);
    }

    t.engine.shutdown().await;
}
