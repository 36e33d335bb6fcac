//! Alert engine: the API the presentation layer talks to.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::info;

use landwatch_cache::WatermarkManager;
use landwatch_core::config::AppConfig;
use landwatch_core::result::AppResult;
use landwatch_core::traits::WatermarkStore;
use landwatch_database::sources::SourceSet;
use landwatch_entity::alert::{Alert, AlertStats, SeriesBucket};
use landwatch_entity::notification::{NotificationState, TrackerPhase, VisitState};
use landwatch_service::alert::{AlertNormalizer, AlertService, SourceFilter};
use landwatch_service::stats::{compute_stats, monthly_series, weekly_series};
use landwatch_service::visit::{VisitOutcome, VisitRecorder};

use crate::notification::NotificationTracker;

/// Multi-source alert aggregation and notification engine for one session.
#[derive(Debug, Clone)]
pub struct AlertEngine {
    /// Fetch and normalize.
    alerts: AlertService,
    /// Live counters.
    tracker: Arc<NotificationTracker>,
}

impl AlertEngine {
    /// Assemble an engine from explicit collaborators.
    pub fn new(sources: SourceSet, watermarks: Arc<dyn WatermarkStore>, config: &AppConfig) -> Self {
        let normalizer = AlertNormalizer::new(config.notifications.license_active_window());
        let alerts = AlertService::new(sources.clone(), normalizer, config.sources.query_limit);
        let tracker = NotificationTracker::new(
            sources,
            VisitRecorder::new(watermarks),
            &config.notifications,
        );

        Self {
            alerts,
            tracker: Arc::new(tracker),
        }
    }

    /// Build the configured source adapters and watermark store, then
    /// assemble an engine over them.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let sources = SourceSet::connect(config).await?;
        let watermarks = WatermarkManager::new(&config.watermark)?;
        info!(
            sources = %config.sources.provider,
            watermark = %config.watermark.provider,
            "Alert engine assembled"
        );
        Ok(Self::new(sources, Arc::new(watermarks), config))
    }

    /// Perform the initial load and start live tracking.
    pub async fn start(&self) -> AppResult<()> {
        self.tracker.start().await
    }

    /// Current alerts matching `query` and `source`, newest first.
    pub async fn get_alerts(&self, query: &str, source: SourceFilter) -> Vec<Alert> {
        self.alerts.search(query, source, Utc::now()).await
    }

    /// Aggregate counts over the current alerts.
    pub async fn get_stats(&self) -> AlertStats {
        let alerts = self.alerts.list_alerts(Utc::now()).await;
        compute_stats(&alerts)
    }

    /// Per-day counts for the last seven days, oldest first.
    pub async fn weekly_series(&self) -> Vec<SeriesBucket> {
        let now = Utc::now();
        let alerts = self.alerts.list_alerts(now).await;
        weekly_series(&alerts, now)
    }

    /// Per-month counts for the last six calendar months, oldest first.
    pub async fn monthly_series(&self) -> Vec<SeriesBucket> {
        let now = Utc::now();
        let alerts = self.alerts.list_alerts(now).await;
        monthly_series(&alerts, now)
    }

    /// Snapshot of the live counters.
    pub fn get_notification_state(&self) -> NotificationState {
        self.tracker.state()
    }

    /// Never visited / up to date / N unseen.
    pub fn visit_state(&self) -> VisitState {
        self.tracker.visit_state()
    }

    /// Tracker lifecycle phase.
    pub fn phase(&self) -> TrackerPhase {
        self.tracker.phase()
    }

    /// Record that the alert view is being presented to the user.
    pub async fn mark_visited(&self) -> VisitOutcome {
        self.tracker.mark_visited().await
    }

    /// Recompute the live counters now.
    pub async fn refresh(&self) -> NotificationState {
        self.tracker.refresh().await
    }

    /// Receiver updated whenever the live counters change.
    pub fn subscribe_state(&self) -> watch::Receiver<NotificationState> {
        self.tracker.subscribe()
    }

    /// Stop live tracking and close the source adapters.
    pub async fn shutdown(&self) {
        self.tracker.shutdown().await;
        self.alerts.sources().close().await;
    }
}
