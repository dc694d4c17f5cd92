//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Search automatically once a chat turn yields complete parameters
    pub auto_search: bool,
    /// Path to history file
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            auto_search: true,
            history_file: dirs::data_dir().map(|d| d.join("travel-assistant").join("history.txt")),
        }
    }
}
