//! In-memory watermark store using dashmap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use landwatch_core::error::AppError;
use landwatch_core::result::AppResult;
use landwatch_core::traits::WatermarkStore;

/// Process-lifetime watermark store.
#[derive(Debug, Clone, Default)]
pub struct MemoryWatermarkStore {
    /// Key → timestamp.
    entries: Arc<DashMap<String, DateTime<Utc>>>,
    /// When set, writes fail as if the store were read-only.
    read_only: Arc<AtomicBool>,
}

impl MemoryWatermarkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

#[async_trait]
impl WatermarkStore for MemoryWatermarkStore {
    async fn get(&self, key: &str) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.entries.get(key).map(|entry| *entry.value()))
    }

    async fn set(&self, key: &str, at: DateTime<Utc>) -> AppResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(AppError::persistence(format!(
                "Watermark store is read-only, '{key}' not written"
            )));
        }
        self.entries.insert(key.to_string(), at);
        debug!(key, %at, "Watermark written");
        Ok(())
    }
}
