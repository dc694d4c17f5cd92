//! Backend status port

use super::planning_error::PlanningError;
use async_trait::async_trait;

/// Health and ticker information reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendStatus {
    pub status: String,
    pub services: Vec<String>,
    /// Live ticker messages (disruptions, announcements)
    pub ticker: Vec<String>,
}

impl BackendStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Gateway for the status endpoints
#[async_trait]
pub trait StatusGateway: Send + Sync {
    async fn status(&self) -> Result<BackendStatus, PlanningError>;
}
