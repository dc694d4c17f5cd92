//! Scripted port fakes shared by the use-case and store tests

use crate::ports::chat_gateway::{ChatGateway, ChatReply, ChatRequest};
use crate::ports::connection_gateway::{ConnectionGateway, ConnectionQuery};
use crate::ports::live_board_gateway::LiveBoardGateway;
use crate::ports::planning_error::PlanningError;
use crate::ports::session_storage::{SessionStorage, StorageError};
use crate::ports::station_gateway::StationGateway;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use travel_domain::{
    DepartureBoard, EvaCode, Journey, Leg, PrePlan, SearchParams, SessionToken, StationRef, Train,
};

// === Storage ===

pub(crate) struct MemoryStorage {
    token: Mutex<Option<SessionToken>>,
    failing: bool,
    pub saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
            failing: false,
            saves: AtomicUsize::new(0),
        }
    }

    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        *storage.token.lock().unwrap() = Some(SessionToken::try_new(token).unwrap());
        storage
    }

    /// Storage whose every operation fails (disabled storage, quota)
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn stored(&self) -> Option<SessionToken> {
        self.token.lock().unwrap().clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("disabled".to_string()));
        }
        Ok(self.stored())
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.token.lock().unwrap() = Some(token.clone());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("disabled".to_string()));
        }
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

// === Chat ===

pub(crate) struct MockChatGateway {
    replies: Mutex<VecDeque<Result<ChatReply, PlanningError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatGateway {
    pub fn new(replies: Vec<Result<ChatReply, PlanningError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatGateway for MockChatGateway {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, PlanningError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PlanningError::Transport("no scripted reply".to_string())))
    }
}

pub(crate) fn reply(message: &str, session_id: Option<&str>, params: SearchParams) -> ChatReply {
    ChatReply {
        message: message.to_string(),
        session_id: session_id.map(str::to_string),
        search_params: params,
    }
}

// === Connections ===

/// Holds a scripted response until the test opens it
#[derive(Clone, Default)]
pub(crate) struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until the gateway call has started
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let the gateway call complete
    pub fn open(&self) {
        self.release.notify_one();
    }
}

struct Scripted {
    result: Result<Vec<Journey>, PlanningError>,
    gate: Option<Gate>,
}

pub(crate) struct MockConnectionGateway {
    responses: Mutex<VecDeque<Scripted>>,
    queries: Mutex<Vec<ConnectionQuery>>,
    pre_plans: Mutex<Vec<PrePlan>>,
    pub calls: AtomicUsize,
}

impl MockConnectionGateway {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            pre_plans: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn respond(self, result: Result<Vec<Journey>, PlanningError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted { result, gate: None });
        self
    }

    pub fn respond_after(self, gate: &Gate, result: Result<Vec<Journey>, PlanningError>) -> Self {
        self.responses.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(gate.clone()),
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<ConnectionQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn pre_plans(&self) -> Vec<PrePlan> {
        self.pre_plans.lock().unwrap().clone()
    }

    async fn next(&self) -> Result<Vec<Journey>, PlanningError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.responses.lock().unwrap().pop_front();
        let Some(scripted) = scripted else {
            return Err(PlanningError::Transport("no scripted response".to_string()));
        };
        if let Some(gate) = scripted.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        scripted.result
    }
}

#[async_trait]
impl ConnectionGateway for MockConnectionGateway {
    async fn find_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<Vec<Journey>, PlanningError> {
        self.queries.lock().unwrap().push(query.clone());
        self.next().await
    }

    async fn find_connections_for_pre_plan(
        &self,
        pre_plan: &PrePlan,
    ) -> Result<Vec<Journey>, PlanningError> {
        self.pre_plans.lock().unwrap().push(pre_plan.clone());
        self.next().await
    }
}

// === Stations ===

pub(crate) struct MockStationGateway {
    result: Result<Vec<StationRef>, PlanningError>,
    pub calls: AtomicUsize,
}

impl MockStationGateway {
    pub fn new(result: Result<Vec<StationRef>, PlanningError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StationGateway for MockStationGateway {
    async fn search_stations(&self, _query: &str) -> Result<Vec<StationRef>, PlanningError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

// === Live board ===

pub(crate) struct MockLiveBoardGateway {
    result: Result<DepartureBoard, PlanningError>,
    queries: Mutex<Vec<String>>,
}

impl MockLiveBoardGateway {
    pub fn new(result: Result<DepartureBoard, PlanningError>) -> Self {
        Self {
            result,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LiveBoardGateway for MockLiveBoardGateway {
    async fn departure_board(&self, station: &str) -> Result<DepartureBoard, PlanningError> {
        self.queries.lock().unwrap().push(station.to_string());
        self.result.clone()
    }
}

// === Journeys ===

pub(crate) fn station(name: &str, eva: &str) -> StationRef {
    StationRef::new(name, EvaCode::parse(eva).unwrap())
}

fn at(minutes_after_eight: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 7)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
        + chrono::Duration::minutes(minutes_after_eight)
}

/// Journey calling at `stops` in order, one hour per leg, ten minutes per change
pub(crate) fn journey(id: &str, stops: &[StationRef]) -> Journey {
    let legs: Vec<Leg> = stops
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let departure = at(i as i64 * 70);
            let arrival = departure + chrono::Duration::minutes(60);
            Leg {
                origin: pair[0].clone(),
                destination: pair[1].clone(),
                train: Train {
                    name: "ICE".to_string(),
                    number: format!("ICE {}", 100 + i),
                    start_location: pair[0].clone(),
                    end_location: pair[1].clone(),
                    departure,
                    arrival,
                    stops: vec![],
                    platform: None,
                    wagons: vec![],
                },
                departure,
                arrival,
                delay_minutes: None,
            }
        })
        .collect();
    let total = (legs.len() as u32 * 70).saturating_sub(10);
    let transfers = legs.len().saturating_sub(1) as u32;
    Journey::new(
        id,
        stops[0].clone(),
        stops[stops.len() - 1].clone(),
        legs,
        total,
        format!("journey {id}"),
    )
    .with_reported_transfers(transfers)
}

pub(crate) fn berlin_hamburg(id: &str) -> Journey {
    journey(
        id,
        &[
            station("Berlin Hbf", "8011160"),
            station("Hannover Hbf", "8000152"),
            station("Hamburg Hbf", "8002549"),
        ],
    )
}
