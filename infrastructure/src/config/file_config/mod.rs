//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod logging;
mod output;
mod session;

pub use backend::FileBackendConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use session::FileSessionConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend connection settings
    pub backend: FileBackendConfig,
    /// Session persistence settings
    pub session: FileSessionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[backend]
base_url = "https://planner.example.org"
api_prefix = "/api/v2"
timeout_seconds = 10
example_connections = true

[session]
persist = false
store_path = "/tmp/session.json"

[output]
format = "full"
color = false

[logging]
transcript_path = "/tmp/transcript.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "https://planner.example.org");
        assert_eq!(config.backend.api_prefix, "/api/v2");
        assert_eq!(config.backend.timeout_seconds, 10);
        assert!(config.backend.example_connections);
        assert!(!config.session.persist);
        assert_eq!(
            config.session.store_path.as_deref(),
            Some(std::path::Path::new("/tmp/session.json"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(config.logging.transcript_path.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: FileConfig = toml::from_str("[backend]\ntimeout_seconds = 5\n").unwrap();
        assert_eq!(config.backend.timeout_seconds, 5);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.api_prefix, "/api/v1");
        assert!(config.session.persist);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = FileConfig::default();
        config.backend.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = FileConfig::default();
        config.backend.base_url = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyBaseUrl));
    }
}
