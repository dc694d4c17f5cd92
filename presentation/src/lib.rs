//! Presentation layer for travel-assistant
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive planning interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{PlanningRepl, ReplCommand};
pub use cli::commands::{Cli, OutputFormat};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
