//! Planning store
//!
//! Composes the session manager and the three services, and owns the
//! [`PlanningState`] the UI observes. Every write happens inside a short
//! `send_modify` section; nothing is held across an `.await`.
//!
//! # Overlapping searches
//!
//! The latest search wins. Starting a search cancels the previous one, which
//! then settles as [`OperationStatus::Superseded`] without writing anything.
//! A generation counter is checked inside the final write, so a search that
//! loses the race to its own cancellation still cannot overwrite newer
//! results.

use super::state::{OperationKind, OperationStatus, PlanningState};
use crate::ports::planning_error::PlanningError;
use crate::use_cases::lookup_stations::StationLookupService;
use crate::use_cases::request_pre_plan::PrePlanService;
use crate::use_cases::search_connections::{ConnectionSearchService, JourneySearch};
use crate::use_cases::session_manager::SessionManager;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use travel_domain::{PrePlan, SearchParams};

/// The search currently allowed to settle state
struct ActiveSearch {
    generation: u64,
    cancel: CancellationToken,
}

pub struct PlanningStore {
    pre_plans: PrePlanService,
    search: ConnectionSearchService,
    stations: StationLookupService,
    session: Arc<SessionManager>,
    state: watch::Sender<PlanningState>,
    search_generation: AtomicU64,
    active_search: Mutex<Option<ActiveSearch>>,
}

impl PlanningStore {
    pub fn new(
        pre_plans: PrePlanService,
        search: ConnectionSearchService,
        stations: StationLookupService,
        session: Arc<SessionManager>,
    ) -> Self {
        let initial = PlanningState {
            session_token: session.get(),
            ..Default::default()
        };
        let (state, _) = watch::channel(initial);

        Self {
            pre_plans,
            search,
            stations,
            session,
            state,
            search_generation: AtomicU64::new(0),
            active_search: Mutex::new(None),
        }
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> PlanningState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<PlanningState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Run one chat turn and replace the pre-plan.
    ///
    /// Never touches `journeys`. A rejected utterance keeps the previous
    /// pre-plan; a backend failure replaces it with a failure pre-plan.
    pub async fn request_pre_plan(&self, utterance: &str) -> OperationStatus {
        let result = self.pre_plans.request_pre_plan(utterance).await;
        let session_token = self.session.get();

        let mut status = OperationStatus::Completed;
        self.state.send_modify(|state| {
            state.session_token = session_token;
            match result {
                Ok(pre_plan) => {
                    state.search_params = Some(pre_plan.search_params.clone());
                    state.pre_plan = Some(pre_plan);
                    state.record_success(OperationKind::PrePlan);
                }
                Err(e) => {
                    let message = e.to_string();
                    if !e.is_local() {
                        state.pre_plan = Some(PrePlan::failure(message.clone()));
                    }
                    state.record_failure(OperationKind::PrePlan, message);
                    status = OperationStatus::Failed;
                }
            }
        });
        status
    }

    /// Search by explicit parameters, recording them as the current ones
    pub async fn search_by_params(&self, params: SearchParams) -> OperationStatus {
        let service = &self.search;
        let recorded = params.clone();
        self.run_search(Some(recorded), async move {
            service.search_by_params(&params).await
        })
        .await
    }

    /// Search with a pre-plan as context
    pub async fn search_by_pre_plan(&self, pre_plan: PrePlan) -> OperationStatus {
        let service = &self.search;
        self.run_search(None, async move { service.search_by_pre_plan(&pre_plan).await })
            .await
    }

    /// Refresh station candidates. Failures surface as an empty list.
    pub async fn lookup_stations(&self, query: &str) -> OperationStatus {
        let stations = self.stations.lookup(query).await;
        self.state.send_modify(|state| state.stations = stations);
        OperationStatus::Completed
    }

    /// Forget the session so the next chat turn starts a new conversation
    pub fn clear_session(&self) {
        self.session.clear();
        self.state.send_modify(|state| state.session_token = None);
        info!("Session cleared");
    }

    async fn run_search<F>(&self, params: Option<SearchParams>, search: F) -> OperationStatus
    where
        F: Future<Output = Result<JourneySearch, PlanningError>>,
    {
        let (generation, cancel) = self.begin_search(params);
        let _loading = LoadingGuard {
            store: self,
            generation,
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = search => Some(result),
        };
        let Some(result) = result else {
            debug!("Search #{} superseded before it settled", generation);
            return OperationStatus::Superseded;
        };

        self.settle(generation, result)
    }

    fn begin_search(&self, params: Option<SearchParams>) -> (u64, CancellationToken) {
        let cancel = CancellationToken::new();
        let generation = {
            let mut active = self
                .active_search
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(previous) = active.replace(ActiveSearch {
                generation,
                cancel: cancel.clone(),
            }) {
                debug!("Search #{} supersedes #{}", generation, previous.generation);
                previous.cancel.cancel();
            }
            generation
        };

        self.state.send_modify(|state| {
            state.journeys.clear();
            state.journey_defects.clear();
            state.loading = true;
            if let Some(params) = params {
                state.search_params = Some(params);
            }
        });
        (generation, cancel)
    }

    fn settle(
        &self,
        generation: u64,
        result: Result<JourneySearch, PlanningError>,
    ) -> OperationStatus {
        let mut status = OperationStatus::Superseded;
        self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            match result {
                Ok(search) => {
                    state.journeys = search.journeys;
                    state.journey_defects = search.defects;
                    state.record_success(OperationKind::Search);
                    status = OperationStatus::Completed;
                }
                Err(e) => {
                    state.record_failure(OperationKind::Search, e.to_string());
                    status = OperationStatus::Failed;
                }
            }
            state.loading = false;
            true
        });
        status
    }

    fn is_current(&self, generation: u64) -> bool {
        self.search_generation.load(Ordering::SeqCst) == generation
    }
}

/// Clears `loading` when the latest search ends, however it ends
struct LoadingGuard<'a> {
    store: &'a PlanningStore,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let store = self.store;
        let generation = self.generation;
        store.state.send_if_modified(|state| {
            if state.loading && store.is_current(generation) {
                state.loading = false;
                true
            } else {
                false
            }
        });
    }
}
