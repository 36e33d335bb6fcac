//! Persists the "last visited" watermark.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use landwatch_cache::keys;
use landwatch_core::error::{AppError, ErrorKind};
use landwatch_core::result::AppResult;
use landwatch_core::traits::WatermarkStore;

/// Result of one visit.
#[derive(Debug, Clone)]
pub struct VisitOutcome {
    /// The timestamp that was recorded.
    pub visited_at: DateTime<Utc>,
    /// Whether the watermark reached the store.
    pub persisted: bool,
    /// Why the watermark did not persist, if it didn't.
    pub warning: Option<AppError>,
}

impl VisitOutcome {
    /// Whether the visit was recorded only in memory.
    pub fn is_degraded(&self) -> bool {
        !self.persisted
    }
}

/// Reads and writes the alert-view watermark of one session.
#[derive(Debug, Clone)]
pub struct VisitRecorder {
    /// Session watermark store.
    store: Arc<dyn WatermarkStore>,
}

impl VisitRecorder {
    /// Creates a new visit recorder.
    pub fn new(store: Arc<dyn WatermarkStore>) -> Self {
        Self { store }
    }

    /// The persisted watermark, `None` if the view was never visited.
    pub async fn last_visited(&self) -> AppResult<Option<DateTime<Utc>>> {
        self.store
            .get(keys::alerts_last_visited())
            .await
            .map_err(as_persistence)
    }

    /// Overwrite the watermark with `at`.
    ///
    /// Never fails: a store error is returned as the outcome's warning.
    pub async fn record_visit(&self, at: DateTime<Utc>) -> VisitOutcome {
        match self.store.set(keys::alerts_last_visited(), at).await {
            Ok(()) => {
                info!(visited_at = %at, "Alert view visited");
                VisitOutcome {
                    visited_at: at,
                    persisted: true,
                    warning: None,
                }
            }
            Err(e) => {
                let e = as_persistence(e);
                warn!(visited_at = %at, "Visit watermark not persisted: {e}");
                VisitOutcome {
                    visited_at: at,
                    persisted: false,
                    warning: Some(e),
                }
            }
        }
    }
}

fn as_persistence(e: AppError) -> AppError {
    if e.kind == ErrorKind::PersistenceFailure {
        e
    } else {
        AppError::with_source(ErrorKind::PersistenceFailure, "Watermark store failed", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landwatch_cache::memory::MemoryWatermarkStore;

    #[tokio::test]
    async fn test_never_visited() {
        let recorder = VisitRecorder::new(Arc::new(MemoryWatermarkStore::new()));
        assert_eq!(recorder.last_visited().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_overwrites() {
        let recorder = VisitRecorder::new(Arc::new(MemoryWatermarkStore::new()));
        let first = Utc::now();
        let second = first + chrono::Duration::seconds(5);

        assert!(recorder.record_visit(first).await.persisted);
        let outcome = recorder.record_visit(second).await;
        assert!(outcome.persisted);
        assert!(outcome.warning.is_none());
        assert_eq!(recorder.last_visited().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_write_failure_becomes_warning() {
        let store = Arc::new(MemoryWatermarkStore::new());
        store.set_read_only(true);
        let recorder = VisitRecorder::new(store);

        let outcome = recorder.record_visit(Utc::now()).await;
        assert!(outcome.is_degraded());
        assert_eq!(
            outcome.warning.map(|w| w.kind),
            Some(ErrorKind::PersistenceFailure)
        );
        assert_eq!(recorder.last_visited().await.unwrap(), None);
    }
}
