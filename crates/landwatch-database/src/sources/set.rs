//! The three source adapters bundled together.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{info, warn};

use landwatch_core::config::AppConfig;
use landwatch_core::error::AppError;
use landwatch_core::events::InsertEvent;
use landwatch_core::result::AppResult;
use landwatch_core::traits::SourceAdapter;
use landwatch_core::types::{RecordFilter, SourceKind, SubscriptionHandle};
use landwatch_entity::record::{FieldReport, LicenseRecord, SatelliteReport};

use crate::connection::DatabasePool;

use super::memory::MemorySource;
use super::postgres::PgSource;

/// Satellite, field-report, and license-registry adapters.
#[derive(Debug, Clone)]
pub struct SourceSet {
    /// Satellite change-detection reports.
    pub satellite: Arc<dyn SourceAdapter<SatelliteReport>>,
    /// Community field reports.
    pub field_reports: Arc<dyn SourceAdapter<FieldReport>>,
    /// License registry.
    pub licenses: Arc<dyn SourceAdapter<LicenseRecord>>,
    /// Pool behind PostgreSQL adapters, closed by [`close`](Self::close).
    pool: Option<DatabasePool>,
}

impl SourceSet {
    /// Bundle three adapters.
    pub fn new(
        satellite: Arc<dyn SourceAdapter<SatelliteReport>>,
        field_reports: Arc<dyn SourceAdapter<FieldReport>>,
        licenses: Arc<dyn SourceAdapter<LicenseRecord>>,
    ) -> Self {
        Self {
            satellite,
            field_reports,
            licenses,
            pool: None,
        }
    }

    /// PostgreSQL-backed adapters sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool();
        Self {
            pool: Some(pool.clone()),
            ..Self::new(
                Arc::new(PgSource::<SatelliteReport>::new(pg.clone())),
                Arc::new(PgSource::<FieldReport>::new(pg.clone())),
                Arc::new(PgSource::<LicenseRecord>::new(pg.clone())),
            )
        }
    }

    /// Empty in-process adapters.
    pub fn memory() -> Self {
        Self::new(
            Arc::new(MemorySource::<SatelliteReport>::new()),
            Arc::new(MemorySource::<FieldReport>::new()),
            Arc::new(MemorySource::<LicenseRecord>::new()),
        )
    }

    /// Build the adapters selected by `sources.provider`.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        match config.sources.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL source adapters");
                let pool = DatabasePool::connect(&config.database).await?;
                crate::migration::run_migrations(pool.pool()).await?;
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Initializing in-memory source adapters");
                Ok(Self::memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown source provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Close the database pool, if the adapters have one.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Source adapters closed");
        }
    }

    /// Count records of one source.
    pub async fn count(&self, kind: SourceKind, filter: &RecordFilter) -> AppResult<u64> {
        match kind {
            SourceKind::Satellite => self.satellite.count_records(filter).await,
            SourceKind::FieldReport => self.field_reports.count_records(filter).await,
            SourceKind::LicenseRegistry => self.licenses.count_records(filter).await,
        }
    }

    /// Subscribe all three sources into one sink.
    ///
    /// A source whose subscription fails is logged and skipped; the others
    /// still deliver.
    pub async fn subscribe_all(&self, sink: mpsc::Sender<InsertEvent>) -> Vec<SubscriptionHandle> {
        let results = join_all([
            self.satellite.subscribe_inserts(sink.clone()),
            self.field_reports.subscribe_inserts(sink.clone()),
            self.licenses.subscribe_inserts(sink),
        ])
        .await;

        results
            .into_iter()
            .zip(SourceKind::ALL)
            .filter_map(|(result, kind)| match result {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!(source = %kind, "Insert subscription failed: {e}");
                    None
                }
            })
            .collect()
    }
}
