//! Backend configuration from TOML (`[backend]` section)

use serde::{Deserialize, Serialize};

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Scheme, host and port of the planning backend
    pub base_url: String,
    /// Path prefix of every endpoint
    pub api_prefix: String,
    /// Request timeout
    pub timeout_seconds: u64,
    /// Use the canned `/connections/example` endpoint for parameter searches
    pub example_connections: bool,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            timeout_seconds: 30,
            example_connections: false,
        }
    }
}
