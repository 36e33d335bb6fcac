//! Fetches all three sources and normalizes them into alerts.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use landwatch_core::result::AppResult;
use landwatch_core::types::{RecordFilter, SourceKind};
use landwatch_database::sources::SourceSet;
use landwatch_entity::alert::Alert;

use super::filter::{SourceFilter, filter_alerts};
use super::normalizer::{AlertNormalizer, SourceBatch};

/// Alert fetch-and-normalize service.
#[derive(Debug, Clone)]
pub struct AlertService {
    /// Source adapters.
    sources: SourceSet,
    /// Row → alert mapping.
    normalizer: AlertNormalizer,
    /// Maximum rows per source per fetch.
    query_limit: u32,
}

impl AlertService {
    /// Creates a new alert service.
    pub fn new(sources: SourceSet, normalizer: AlertNormalizer, query_limit: u32) -> Self {
        Self {
            sources,
            normalizer,
            query_limit,
        }
    }

    /// The underlying source adapters.
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Fetch raw rows from all sources concurrently.
    ///
    /// A failing source contributes no rows for this cycle.
    pub async fn fetch_batch(&self) -> SourceBatch {
        let filter = RecordFilter::all().with_limit(self.query_limit);
        let started = Instant::now();

        let (satellite, field_reports, licenses) = tokio::join!(
            self.sources.satellite.query_records(&filter),
            self.sources.field_reports.query_records(&filter),
            self.sources.licenses.query_records(&filter),
        );

        let batch = SourceBatch {
            satellite: or_empty(SourceKind::Satellite, satellite),
            field_reports: or_empty(SourceKind::FieldReport, field_reports),
            licenses: or_empty(SourceKind::LicenseRegistry, licenses),
        };

        debug!(
            rows = batch.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched source rows"
        );
        batch
    }

    /// All current alerts, newest first.
    pub async fn list_alerts(&self, now: DateTime<Utc>) -> Vec<Alert> {
        let batch = self.fetch_batch().await;
        let mut alerts = self.normalizer.normalize(&batch, now);
        alerts.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        alerts
    }

    /// Current alerts narrowed by source and free-text query, newest first.
    pub async fn search(
        &self,
        query: &str,
        source: SourceFilter,
        now: DateTime<Utc>,
    ) -> Vec<Alert> {
        let alerts = self.list_alerts(now).await;
        filter_alerts(&alerts, query, source)
    }
}

fn or_empty<T>(kind: SourceKind, result: AppResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!(source = %kind, "Source query failed, treating as empty: {e}");
            Vec::new()
        }
    }
}
