//! Infrastructure layer for travel-assistant
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileSessionConfig,
};
pub use http::HttpBackend;
pub use logging::JsonlTranscriptLogger;
pub use storage::{FileSessionStorage, InMemorySessionStorage};
