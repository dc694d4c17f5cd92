//! Station search gateway port

use super::planning_error::PlanningError;
use async_trait::async_trait;
use travel_domain::StationRef;

/// Gateway for free-text station search
#[async_trait]
pub trait StationGateway: Send + Sync {
    /// Resolve free text into station candidates
    async fn search_stations(&self, query: &str) -> Result<Vec<StationRef>, PlanningError>;
}
