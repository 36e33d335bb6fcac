//! Watermark manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use landwatch_core::config::watermark::WatermarkConfig;
use landwatch_core::error::AppError;
use landwatch_core::result::AppResult;
use landwatch_core::traits::WatermarkStore;

/// Watermark manager that wraps the configured store.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct WatermarkManager {
    /// The inner store.
    inner: Arc<dyn WatermarkStore>,
}

impl WatermarkManager {
    /// Create a new watermark manager from configuration.
    pub fn new(config: &WatermarkConfig) -> AppResult<Self> {
        let inner: Arc<dyn WatermarkStore> = match config.provider.as_str() {
            #[cfg(feature = "file")]
            "file" => {
                info!(path = %config.path, "Initializing file watermark store");
                Arc::new(crate::file::FileWatermarkStore::new(&config.path))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory watermark store");
                Arc::new(crate::memory::MemoryWatermarkStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown watermark provider: '{other}'. Supported: memory, file"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl WatermarkStore for WatermarkManager {
    async fn get(&self, key: &str) -> AppResult<Option<DateTime<Utc>>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, at: DateTime<Utc>) -> AppResult<()> {
        self.inner.set(key, at).await
    }
}
