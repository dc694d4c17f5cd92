//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_status;
pub mod live_board;
pub mod lookup_stations;
pub mod request_pre_plan;
pub mod search_connections;
pub mod session_manager;
