//! Live departure board port

use super::planning_error::PlanningError;
use async_trait::async_trait;
use travel_domain::DepartureBoard;

/// Gateway for a station's real-time departures
#[async_trait]
pub trait LiveBoardGateway: Send + Sync {
    /// Fetch the board for a station given by name.
    ///
    /// Unknown stations come back as a server error carrying the backend's
    /// detail text.
    async fn departure_board(&self, station: &str) -> Result<DepartureBoard, PlanningError>;
}
