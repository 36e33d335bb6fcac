//! Source adapter trait for the three alert origins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::events::InsertEvent;
use crate::result::AppResult;
use crate::types::filter::RecordFilter;
use crate::types::source::SourceKind;
use crate::types::subscription::SubscriptionHandle;

/// A raw row produced by one of the sources.
pub trait SourceRecord: Clone + Send + Sync + 'static {
    /// The source this row type belongs to.
    const SOURCE: SourceKind;

    /// The row's own primary key, rendered as a string.
    fn record_id(&self) -> String;

    /// When the row was created.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Read-only accessor for one source store.
///
/// The engine treats rows as opaque; all derivation happens in the
/// normalizer. Implementations must be safe to call concurrently.
#[async_trait]
pub trait SourceAdapter<Row>: Send + Sync + std::fmt::Debug + 'static
where
    Row: SourceRecord,
{
    /// The source this adapter reads from.
    fn source(&self) -> SourceKind {
        Row::SOURCE
    }

    /// Fetch rows matching the filter, newest first.
    async fn query_records(&self, filter: &RecordFilter) -> AppResult<Vec<Row>>;

    /// Count rows matching the filter.
    async fn count_records(&self, filter: &RecordFilter) -> AppResult<u64>;

    /// Deliver an [`InsertEvent`] into `sink` for every new row until the
    /// returned handle is unsubscribed or dropped.
    async fn subscribe_inserts(
        &self,
        sink: mpsc::Sender<InsertEvent>,
    ) -> AppResult<SubscriptionHandle>;
}
