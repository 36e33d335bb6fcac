//! Watermark store configuration.

use serde::{Deserialize, Serialize};

/// Where the "last visited" watermark is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkConfig {
    /// Store backend: `"memory"` or `"file"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Path of the JSON file used by the `file` backend.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            path: default_path(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_path() -> String {
    "data/session/watermarks.json".to_string()
}
