//! Interactive planning module
//!
//! Provides a reedline-based interactive interface for planning a trip
//! over several chat turns.

mod repl;

pub use repl::{PlanningRepl, ReplCommand};
