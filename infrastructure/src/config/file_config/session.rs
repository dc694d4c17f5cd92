//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw session configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Keep the session token across runs
    pub persist: bool,
    /// Override for the session file location
    pub store_path: Option<PathBuf>,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            persist: true,
            store_path: None,
        }
    }
}
