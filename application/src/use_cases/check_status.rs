//! Check Status use case
//!
//! Reports backend health and the live ticker.

use crate::ports::planning_error::PlanningError;
use crate::ports::status_gateway::{BackendStatus, StatusGateway};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for querying backend status
pub struct CheckStatusUseCase {
    gateway: Arc<dyn StatusGateway>,
}

impl CheckStatusUseCase {
    pub fn new(gateway: Arc<dyn StatusGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self) -> Result<BackendStatus, PlanningError> {
        let status = self.gateway.status().await;
        match &status {
            Ok(s) if s.is_ok() => info!("Backend ok ({} services)", s.services.len()),
            Ok(s) => warn!("Backend reports status '{}'", s.status),
            Err(e) => warn!("Backend status unavailable: {}", e),
        }
        status
    }
}
