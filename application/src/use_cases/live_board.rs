//! Live board use case
//!
//! Shows the upcoming departures at one station.

use crate::ports::live_board_gateway::LiveBoardGateway;
use crate::ports::planning_error::PlanningError;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use std::sync::Arc;
use tracing::{info, warn};
use travel_domain::DepartureBoard;

/// Use case for fetching a station's departure board
pub struct LiveBoardUseCase {
    gateway: Arc<dyn LiveBoardGateway>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl LiveBoardUseCase {
    pub fn new(gateway: Arc<dyn LiveBoardGateway>) -> Self {
        Self {
            gateway,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Blank station names are rejected before any request is made.
    pub async fn execute(&self, station: &str) -> Result<DepartureBoard, PlanningError> {
        let station = station.trim();
        if station.is_empty() {
            return Err(PlanningError::Validation(
                "Station name cannot be empty".to_string(),
            ));
        }

        match self.gateway.departure_board(station).await {
            Ok(board) => {
                info!(
                    "Live board for {}: {} departures",
                    board.station,
                    board.departures().len()
                );
                self.transcript.log(TranscriptEvent::new(
                    "live_board",
                    serde_json::json!({
                        "query": station,
                        "station": &board.station,
                        "departures": board.departures().len(),
                    }),
                ));
                Ok(board)
            }
            Err(e) => {
                warn!("Live board for '{}' failed: {}", station, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockLiveBoardGateway, station};

    #[tokio::test]
    async fn test_blank_station_never_reaches_backend() {
        let gateway = Arc::new(MockLiveBoardGateway::new(Ok(DepartureBoard::new(
            station("Berlin Hbf", "8011160"),
            vec![],
        ))));
        let use_case = LiveBoardUseCase::new(gateway.clone());

        let result = use_case.execute("   ").await;

        assert!(matches!(result, Err(PlanningError::Validation(_))));
        assert!(gateway.queries().is_empty());
    }

    #[tokio::test]
    async fn test_station_name_is_trimmed() {
        let board = DepartureBoard::new(station("Berlin Hbf", "8011160"), vec![]);
        let gateway = Arc::new(MockLiveBoardGateway::new(Ok(board.clone())));
        let use_case = LiveBoardUseCase::new(gateway.clone());

        assert_eq!(use_case.execute("  Berlin Hbf ").await.unwrap(), board);
        assert_eq!(gateway.queries(), vec!["Berlin Hbf".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_station_keeps_server_detail() {
        let gateway = Arc::new(MockLiveBoardGateway::new(Err(PlanningError::Server {
            status: 404,
            detail: "Station 'Atlantis' not found".to_string(),
        })));
        let use_case = LiveBoardUseCase::new(gateway);

        let error = use_case.execute("Atlantis").await.unwrap_err();

        assert_eq!(error.to_string(), "Station 'Atlantis' not found");
    }
}
