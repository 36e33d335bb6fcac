//! JSON-file watermark store.
//!
//! The whole key space lives in one JSON object. Writes go to a sibling
//! temp file that is then renamed over the original, so a crash mid-write
//! leaves the previous contents intact.

use std::collections::BTreeMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use landwatch_core::error::{AppError, ErrorKind};
use landwatch_core::result::AppResult;
use landwatch_core::traits::WatermarkStore;

type Entries = BTreeMap<String, DateTime<Utc>>;

/// Watermark store persisted as a JSON file.
#[derive(Debug)]
pub struct FileWatermarkStore {
    /// Path of the JSON file.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileWatermarkStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<Entries> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Entries::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceFailure,
                    format!("Corrupt watermark file {}", self.path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::PersistenceFailure,
                format!("Failed to read watermark file {}", self.path.display()),
                e,
            )),
        }
    }

    async fn store(&self, entries: &Entries) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.write_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.write_error(e))
    }

    fn write_error(&self, e: std::io::Error) -> AppError {
        AppError::with_source(
            ErrorKind::PersistenceFailure,
            format!("Failed to write watermark file {}", self.path.display()),
            e,
        )
    }
}

#[async_trait]
impl WatermarkStore for FileWatermarkStore {
    async fn get(&self, key: &str) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.load().await?.get(key).copied())
    }

    async fn set(&self, key: &str, at: DateTime<Utc>) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await?;
        entries.insert(key.to_string(), at);
        self.store(&entries).await?;

        debug!(key, %at, path = %self.path.display(), "Watermark persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWatermarkStore::new(dir.path().join("watermarks.json"));
        assert_eq!(store.get("alerts_last_visited").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session").join("watermarks.json");
        let at = Utc::now();

        FileWatermarkStore::new(&path)
            .set("alerts_last_visited", at)
            .await
            .unwrap();

        let reopened = FileWatermarkStore::new(&path);
        assert_eq!(
            reopened.get("alerts_last_visited").await.unwrap(),
            Some(at)
        );
    }

    #[tokio::test]
    async fn test_other_keys_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWatermarkStore::new(dir.path().join("watermarks.json"));
        let at = Utc::now();
        store.set("other", at).await.unwrap();
        store.set("alerts_last_visited", at).await.unwrap();
        assert_eq!(store.get("other").await.unwrap(), Some(at));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_persistence_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watermarks.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let err = FileWatermarkStore::new(&path)
            .get("alerts_last_visited")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PersistenceFailure);
    }
}
