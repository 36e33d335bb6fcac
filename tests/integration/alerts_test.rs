//! Alert list, search, and statistics tests.

use std::collections::HashSet;

use chrono::{Duration, Utc};

use landwatch_entity::alert::{AlertPriority, AlertSource, AlertStatus};
use landwatch_service::alert::SourceFilter;

use crate::helpers::{TestEngine, license_at, report_at, satellite_at};

fn mixed() -> TestEngine {
    let now = Utc::now();
    TestEngine::new(
        vec![
            satellite_at(now - Duration::hours(2), true),
            satellite_at(now - Duration::days(3), false),
        ],
        vec![report_at(now - Duration::hours(6))],
        vec![
            license_at("pending", now - Duration::hours(1)),
            license_at("active", now - Duration::days(2)),
            license_at("active", now - Duration::days(10)),
            license_at("revoked", now - Duration::days(20)),
        ],
    )
}

#[tokio::test]
async fn test_illegal_satellite_scenario() {
    let t = mixed();
    let alerts = t.engine.get_alerts("tarkwa", SourceFilter::Satellite).await;
    let illegal = alerts
        .iter()
        .find(|a| a.is_illegal == Some(true))
        .expect("illegal satellite alert");

    assert_eq!(illegal.status, AlertStatus::New);
    assert_eq!(illegal.priority, AlertPriority::High);
    assert_eq!(illegal.description, "Illegal mining detected - BSI");
    assert_eq!(illegal.location, "Tarkwa");
}

#[tokio::test]
async fn test_stale_active_license_is_excluded() {
    let t = mixed();
    let licenses = t.engine.get_alerts("", SourceFilter::System).await;

    assert_eq!(licenses.len(), 3);
    let activated: Vec<_> = licenses
        .iter()
        .filter(|a| a.description.starts_with("License activated"))
        .collect();
    assert_eq!(activated.len(), 1);
    assert_eq!(activated[0].status, AlertStatus::Resolved);
}

#[tokio::test]
async fn test_unfiltered_list_is_everything_newest_first() {
    let t = mixed();
    let alerts = t.engine.get_alerts("", SourceFilter::All).await;

    assert_eq!(alerts.len(), 6);
    let ids: HashSet<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids.len(), alerts.len());
    assert!(
        alerts
            .windows(2)
            .all(|pair| pair[0].occurred_at >= pair[1].occurred_at)
    );
    assert_eq!(alerts[0].source, AlertSource::System);
}

#[tokio::test]
async fn test_stats_and_series() {
    let t = mixed();
    let stats = t.engine.get_stats().await;

    assert_eq!(stats.total, 6);
    assert_eq!(stats.satellite, 2);
    assert_eq!(stats.community, 1);
    assert_eq!(stats.system, 3);
    assert!(stats.is_consistent());

    let weekly = t.engine.weekly_series().await;
    assert_eq!(weekly.len(), 7);
    let weekly_total: u64 = weekly.iter().map(|b| b.total).sum();
    // revoked license is 20 days old
    assert_eq!(weekly_total, 5);
    assert!(weekly_total <= stats.total);

    let monthly = t.engine.monthly_series().await;
    assert_eq!(monthly.len(), 6);
    assert!(monthly.iter().map(|b| b.total).sum::<u64>() <= stats.total);
}

#[tokio::test]
async fn test_failed_source_empties_its_alerts() {
    let t = mixed();
    t.reports.set_unavailable(true);

    let alerts = t.engine.get_alerts("", SourceFilter::All).await;
    assert_eq!(alerts.len(), 5);
    assert!(alerts.iter().all(|a| a.source != AlertSource::Report));
}
