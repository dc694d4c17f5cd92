//! Station lookup service.
//!
//! Autocomplete-style resolution of free text into station candidates.
//! Results are advisory: failures degrade to an empty list.

use crate::ports::station_gateway::StationGateway;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use std::sync::Arc;
use tracing::{debug, warn};
use travel_domain::StationRef;

/// Queries shorter than this (after trimming) are not sent
pub const MIN_QUERY_CHARS: usize = 2;

/// Service for station autocomplete
pub struct StationLookupService {
    gateway: Arc<dyn StationGateway>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl StationLookupService {
    pub fn new(gateway: Arc<dyn StationGateway>) -> Self {
        Self {
            gateway,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Look up station candidates. Never fails.
    pub async fn lookup(&self, query: &str) -> Vec<StationRef> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            debug!("Skipping station lookup for short query '{}'", query);
            return Vec::new();
        }

        match self.gateway.search_stations(query).await {
            Ok(stations) => {
                debug!("Station lookup '{}' -> {} candidates", query, stations.len());
                self.transcript.log(TranscriptEvent::new(
                    "station_lookup",
                    serde_json::json!({ "query": query, "candidates": stations.len() }),
                ));
                stations
            }
            Err(e) => {
                warn!("Station lookup for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::planning_error::PlanningError;
    use crate::test_support::{MockStationGateway, station};

    #[tokio::test]
    async fn test_short_queries_never_reach_backend() {
        let gateway = Arc::new(MockStationGateway::new(Ok(vec![station(
            "Berlin Hbf",
            "8011160",
        )])));
        let service = StationLookupService::new(gateway.clone());

        for query in ["", " ", "B", "  B  ", "Ü"] {
            assert!(service.lookup(query).await.is_empty(), "query {:?}", query);
        }
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_two_characters_is_enough() {
        let berlin = station("Berlin Hbf", "8011160");
        let gateway = Arc::new(MockStationGateway::new(Ok(vec![berlin.clone()])));
        let service = StationLookupService::new(gateway.clone());

        assert_eq!(service.lookup("Be").await, vec![berlin]);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty_list() {
        let gateway = Arc::new(MockStationGateway::new(Err(PlanningError::Transport(
            "connection refused".to_string(),
        ))));
        let service = StationLookupService::new(gateway.clone());

        assert!(service.lookup("Hamburg").await.is_empty());
        assert_eq!(gateway.calls(), 1);
    }
}
