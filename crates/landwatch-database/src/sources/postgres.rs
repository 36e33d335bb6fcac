//! PostgreSQL source adapter.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgListener, PgRow};
use sqlx::{FromRow, PgPool};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use landwatch_core::error::{AppError, ErrorKind};
use landwatch_core::events::InsertEvent;
use landwatch_core::result::AppResult;
use landwatch_core::traits::{SourceAdapter, SourceRecord};
use landwatch_core::types::{RecordFilter, SubscriptionHandle};

use super::table::SourceTable;

/// Delay before retrying after a listener error.
const LISTEN_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Reads one source table and listens for its insert notifications.
pub struct PgSource<Row> {
    pool: PgPool,
    _row: PhantomData<fn() -> Row>,
}

impl<Row> PgSource<Row> {
    /// Create a new adapter over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _row: PhantomData,
        }
    }
}

impl<Row: SourceTable> fmt::Debug for PgSource<Row> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgSource")
            .field("table", &Row::TABLE)
            .finish()
    }
}

#[async_trait]
impl<Row> SourceAdapter<Row> for PgSource<Row>
where
    Row: SourceRecord + SourceTable + for<'r> FromRow<'r, PgRow> + Unpin,
{
    async fn query_records(&self, filter: &RecordFilter) -> AppResult<Vec<Row>> {
        let sql = format!(
            "SELECT * FROM {} WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
             ORDER BY created_at DESC LIMIT $2",
            Row::TABLE
        );

        sqlx::query_as::<_, Row>(&sql)
            .bind(filter.created_since)
            .bind(filter.limit.map(i64::from))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::SourceUnavailable,
                    format!("Failed to query {}", Row::TABLE),
                    e,
                )
            })
    }

    async fn count_records(&self, filter: &RecordFilter) -> AppResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE ($1::timestamptz IS NULL OR created_at >= $1)",
            Row::TABLE
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.created_since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::SourceUnavailable,
                    format!("Failed to count {}", Row::TABLE),
                    e,
                )
            })?;

        Ok(count.max(0) as u64)
    }

    async fn subscribe_inserts(
        &self,
        sink: mpsc::Sender<InsertEvent>,
    ) -> AppResult<SubscriptionHandle> {
        let channel = Row::notify_channel();

        let mut listener = PgListener::connect_with(&self.pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::SourceUnavailable,
                format!("Failed to open listener for {}", Row::TABLE),
                e,
            )
        })?;
        listener.listen(&channel).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::SourceUnavailable,
                format!("Failed to LISTEN on {channel}"),
                e,
            )
        })?;

        info!(source = %Row::SOURCE, channel = %channel, "Subscribed to inserts");

        let (cancel_tx, cancel_rx) = SubscriptionHandle::cancel_channel();
        let task = tokio::spawn(listen_loop::<Row>(listener, sink, cancel_rx));

        Ok(SubscriptionHandle::new(Row::SOURCE, cancel_tx, task))
    }
}

/// Forward notifications into `sink` until cancelled or the sink closes.
async fn listen_loop<Row: SourceRecord>(
    mut listener: PgListener,
    sink: mpsc::Sender<InsertEvent>,
    mut cancel: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            received = listener.recv() => match received {
                Ok(notification) => {
                    let payload = notification.payload();
                    let record_id = (!payload.is_empty()).then(|| payload.to_string());
                    debug!(source = %Row::SOURCE, record_id = ?record_id, "Insert notification");

                    if sink.send(InsertEvent::new(Row::SOURCE, record_id)).await.is_err() {
                        debug!(source = %Row::SOURCE, "Insert sink closed");
                        break;
                    }
                }
                Err(e) => {
                    warn!(source = %Row::SOURCE, "Listener error, retrying: {e}");
                    tokio::time::sleep(LISTEN_RETRY_DELAY).await;
                }
            }
        }
    }

    info!(source = %Row::SOURCE, "Insert subscription ended");
}
