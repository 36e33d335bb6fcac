//! Source adapter configuration.

use serde::{Deserialize, Serialize};

/// Which backend serves the three sources and how much to fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source backend: `"postgres"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum rows fetched per source per fetch cycle.
    #[serde(default = "default_query_limit")]
    pub query_limit: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            query_limit: default_query_limit(),
        }
    }
}

fn default_provider() -> String {
    "postgres".to_string()
}

fn default_query_limit() -> u32 {
    500
}
