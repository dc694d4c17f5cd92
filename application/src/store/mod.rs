//! Planning store
//!
//! The composition root the UI talks to: it owns the observable planning
//! state and is its only writer.

pub mod planning_store;
pub mod state;
