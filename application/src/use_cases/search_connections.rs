//! Connection search service.
//!
//! Resolves search parameters, or a whole pre-plan, into journeys.
//! Journeys keep the backend's order; this service never ranks them.
//! Each result is checked against the journey invariants and defects are
//! reported alongside the journeys rather than repaired.

use crate::ports::connection_gateway::{ConnectionGateway, ConnectionQuery};
use crate::ports::planning_error::PlanningError;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};
use travel_domain::{Journey, JourneyDefect, PrePlan, SearchParams};

/// A defect found in one journey of a result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyIssue {
    pub journey_id: String,
    pub defect: JourneyDefect,
}

/// Outcome of a successful search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneySearch {
    /// Journeys in backend order
    pub journeys: Vec<Journey>,
    pub defects: Vec<JourneyIssue>,
}

impl JourneySearch {
    fn inspect(journeys: Vec<Journey>) -> Self {
        let defects: Vec<JourneyIssue> = journeys
            .iter()
            .flat_map(|journey| {
                journey.defects().into_iter().map(|defect| JourneyIssue {
                    journey_id: journey.id.clone(),
                    defect,
                })
            })
            .collect();

        for issue in &defects {
            warn!(
                "Backend returned defective journey {}: {}",
                issue.journey_id, issue.defect
            );
        }

        Self { journeys, defects }
    }
}

/// Marks a request as in flight for as long as it lives
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Service for retrieving journeys
pub struct ConnectionSearchService {
    gateway: Arc<dyn ConnectionGateway>,
    in_flight: AtomicUsize,
    transcript: Arc<dyn TranscriptLogger>,
}

impl ConnectionSearchService {
    pub fn new(gateway: Arc<dyn ConnectionGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicUsize::new(0),
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Whether a request is currently in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Search by structured parameters.
    ///
    /// Missing origin or destination fails locally without a request.
    pub async fn search_by_params(
        &self,
        params: &SearchParams,
    ) -> Result<JourneySearch, PlanningError> {
        let query = ConnectionQuery::from_params(params)?;
        info!(
            "Searching connections {} -> {}{}",
            query.origin,
            query.destination,
            query
                .via
                .as_deref()
                .map(|via| format!(" via {}", via))
                .unwrap_or_default()
        );

        let result = {
            let _busy = BusyGuard::enter(&self.in_flight);
            self.gateway.find_connections(&query).await
        };

        self.finish(
            serde_json::json!({
                "origin": query.origin,
                "destination": query.destination,
                "via": query.via,
                "min_transfer_time": query.min_transfer_time,
            }),
            result,
        )
    }

    /// Search with a pre-plan as conversational context.
    ///
    /// A failure-marker pre-plan is rejected locally.
    pub async fn search_by_pre_plan(
        &self,
        pre_plan: &PrePlan,
    ) -> Result<JourneySearch, PlanningError> {
        if pre_plan.is_failure() {
            return Err(PlanningError::Validation(
                "Cannot search with a failed pre-plan".to_string(),
            ));
        }
        info!("Searching connections from pre-plan context");

        let result = {
            let _busy = BusyGuard::enter(&self.in_flight);
            self.gateway.find_connections_for_pre_plan(pre_plan).await
        };

        self.finish(serde_json::json!({ "pre_plan": pre_plan }), result)
    }

    fn finish(
        &self,
        request: serde_json::Value,
        result: Result<Vec<Journey>, PlanningError>,
    ) -> Result<JourneySearch, PlanningError> {
        match result {
            Ok(journeys) => {
                info!("Found {} journeys", journeys.len());
                let search = JourneySearch::inspect(journeys);
                self.transcript.log(TranscriptEvent::new(
                    "connection_search",
                    serde_json::json!({
                        "request": request,
                        "journeys": search.journeys.iter().map(|j| &j.id).collect::<Vec<_>>(),
                        "defects": &search.defects,
                    }),
                ));
                Ok(search)
            }
            Err(e) => {
                warn!("Connection search failed: {}", e);
                self.transcript.log(TranscriptEvent::new(
                    "connection_search_error",
                    serde_json::json!({ "request": request, "error": e.to_string() }),
                ));
                Err(e)
            }
        }
    }
}
