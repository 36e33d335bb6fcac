//! Watermark store trait for the persisted "last visited" timestamp.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// Session-scoped key/timestamp store.
///
/// Each user session owns its own store instance, so keys are not
/// namespaced per user. Failures are reported as
/// [`ErrorKind::PersistenceFailure`](crate::error::ErrorKind::PersistenceFailure).
#[async_trait]
pub trait WatermarkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a timestamp. Returns `None` if the key was never written.
    async fn get(&self, key: &str) -> AppResult<Option<DateTime<Utc>>>;

    /// Overwrite a timestamp.
    async fn set(&self, key: &str, at: DateTime<Utc>) -> AppResult<()>;
}
