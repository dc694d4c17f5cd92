//! Application layer for travel-assistant
//!
//! This crate contains the use cases, the planning store, and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod store;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ChatGateway, ChatReply, ChatRequest},
    connection_gateway::{ConnectionGateway, ConnectionQuery},
    live_board_gateway::LiveBoardGateway,
    planning_error::{ErrorKind, PlanningError},
    session_storage::{SessionStorage, StorageError},
    station_gateway::StationGateway,
    status_gateway::{BackendStatus, StatusGateway},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use store::{
    planning_store::PlanningStore,
    state::{OperationKind, OperationStatus, PlanningState, StoreError},
};
pub use use_cases::{
    check_status::CheckStatusUseCase,
    live_board::LiveBoardUseCase,
    lookup_stations::{MIN_QUERY_CHARS, StationLookupService},
    request_pre_plan::PrePlanService,
    search_connections::{ConnectionSearchService, JourneyIssue, JourneySearch},
    session_manager::SessionManager,
};
