//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod chat_gateway;
pub mod connection_gateway;
pub mod live_board_gateway;
pub mod planning_error;
pub mod session_storage;
pub mod station_gateway;
pub mod status_gateway;
pub mod transcript_logger;
