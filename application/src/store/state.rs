//! Observable planning state.

use crate::use_cases::search_connections::JourneyIssue;
use travel_domain::{Journey, PrePlan, SearchParams, SessionToken, StationRef};

/// Which store operation produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    PrePlan,
    Search,
}

/// Latest failure, tagged with the operation that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub kind: OperationKind,
    pub message: String,
}

/// How a store operation settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Completed,
    Failed,
    /// A newer search started first; this one wrote nothing
    Superseded,
}

/// Snapshot of everything the UI renders
///
/// Only [`PlanningStore`](super::planning_store::PlanningStore) writes it;
/// readers get clones via `snapshot()` or a watch receiver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningState {
    pub pre_plan: Option<PrePlan>,
    pub search_params: Option<SearchParams>,
    /// Journeys of the latest search, in backend order
    pub journeys: Vec<Journey>,
    pub journey_defects: Vec<JourneyIssue>,
    pub stations: Vec<StationRef>,
    pub loading: bool,
    pub error: Option<StoreError>,
    pub session_token: Option<SessionToken>,
}

impl PlanningState {
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub(crate) fn record_failure(&mut self, kind: OperationKind, message: String) {
        self.error = Some(StoreError { kind, message });
    }

    /// Clear the error only if an operation of the same kind set it
    pub(crate) fn record_success(&mut self, kind: OperationKind) {
        if self.error.as_ref().is_some_and(|e| e.kind == kind) {
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_clears_only_its_own_kind() {
        let mut state = PlanningState::default();
        state.record_failure(OperationKind::Search, "backend down".to_string());

        state.record_success(OperationKind::PrePlan);
        assert_eq!(state.error_message(), Some("backend down"));

        state.record_success(OperationKind::Search);
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_failure_overwrites_any_kind() {
        let mut state = PlanningState::default();
        state.record_failure(OperationKind::Search, "backend down".to_string());
        state.record_failure(OperationKind::PrePlan, "chat down".to_string());
        assert_eq!(
            state.error,
            Some(StoreError {
                kind: OperationKind::PrePlan,
                message: "chat down".to_string()
            })
        );
    }
}
