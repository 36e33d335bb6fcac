//! In-process source adapter.
//!
//! Holds rows in memory and broadcasts an insert event per `insert()`.
//! Used by the `memory` provider and by tests.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast, mpsc};
use tracing::debug;

use landwatch_core::error::AppError;
use landwatch_core::events::InsertEvent;
use landwatch_core::result::AppResult;
use landwatch_core::traits::{SourceAdapter, SourceRecord};
use landwatch_core::types::{RecordFilter, SubscriptionHandle};

/// Buffer size of the insert broadcast channel.
const INSERT_BUFFER: usize = 256;

/// Vector-backed source with insert notifications.
pub struct MemorySource<Row> {
    /// Stored rows, in insertion order.
    rows: RwLock<Vec<Row>>,
    /// Insert broadcast
    inserts: broadcast::Sender<InsertEvent>,
    /// When set, every query, count, and subscribe fails.
    unavailable: AtomicBool,
}

impl<Row: SourceRecord> MemorySource<Row> {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Create a source pre-loaded with rows.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: RwLock::new(rows),
            inserts: broadcast::channel(INSERT_BUFFER).0,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Store a row and notify subscribers.
    pub async fn insert(&self, row: Row) {
        let event = InsertEvent::new(Row::SOURCE, Some(row.record_id()));
        self.rows.write().await.push(row);
        let _ = self.inserts.send(event);
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Simulate the backing store going down or coming back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::source_unavailable(format!(
                "{} source is unavailable",
                Row::SOURCE
            )));
        }
        Ok(())
    }
}

impl<Row: SourceRecord> Default for MemorySource<Row> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Row: SourceRecord> fmt::Debug for MemorySource<Row> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySource")
            .field("source", &Row::SOURCE)
            .field("unavailable", &self.unavailable.load(Ordering::Relaxed))
            .finish()
    }
}

#[async_trait]
impl<Row: SourceRecord> SourceAdapter<Row> for MemorySource<Row> {
    async fn query_records(&self, filter: &RecordFilter) -> AppResult<Vec<Row>> {
        self.check_available()?;

        let rows = self.rows.read().await;
        let mut matched: Vec<Row> = rows
            .iter()
            .filter(|r| filter.matches(r.created_at()))
            .cloned()
            .collect();
        matched.sort_by_key(|r| std::cmp::Reverse(r.created_at()));

        if let Some(limit) = filter.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }

    async fn count_records(&self, filter: &RecordFilter) -> AppResult<u64> {
        self.check_available()?;

        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|r| filter.matches(r.created_at())).count() as u64)
    }

    async fn subscribe_inserts(
        &self,
        sink: mpsc::Sender<InsertEvent>,
    ) -> AppResult<SubscriptionHandle> {
        self.check_available()?;

        let mut inserts = self.inserts.subscribe();
        let (cancel_tx, mut cancel_rx) = SubscriptionHandle::cancel_channel();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = cancel_rx.changed() => {
                        if changed.is_err() || *cancel_rx.borrow() {
                            break;
                        }
                    }
                    received = inserts.recv() => match received {
                        Ok(event) => {
                            if sink.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // A single trigger covers any number of missed inserts.
                            debug!(source = %Row::SOURCE, skipped, "Insert receiver lagged");
                            if sink.send(InsertEvent::new(Row::SOURCE, None)).await.is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        });

        Ok(SubscriptionHandle::new(Row::SOURCE, cancel_tx, task))
    }
}
