//! Configuration file loading for travel-assistant
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `TRAVEL_<SECTION>__<KEY>` (e.g. `TRAVEL_BACKEND__BASE_URL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./travel.toml` or `./.travel.toml`
//! 4. Global: `$XDG_CONFIG_HOME/travel-assistant/config.toml`
//!    (fallback `~/.config/travel-assistant/config.toml`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileSessionConfig,
};
pub use loader::ConfigLoader;
