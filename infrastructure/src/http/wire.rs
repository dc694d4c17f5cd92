//! Wire formats of the planning backend
//!
//! Request bodies are plain serializable structs. Responses decode into
//! lenient DTOs first and are converted into domain types afterwards, so
//! shape drift in the backend (numbers vs strings, optional collections,
//! alternative field names) stays out of the domain layer.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use travel_application::ports::chat_gateway::ChatReply;
use travel_application::ports::connection_gateway::ConnectionQuery;
use travel_application::ports::planning_error::PlanningError;
use travel_application::ports::status_gateway::BackendStatus;
use travel_domain::{
    Departure, DepartureBoard, EvaCode, Journey, Leg, PrePlan, SearchParams, StationRef,
    StopEvent, Train,
};

const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Compact timetable stamp used on live boards, e.g. `2512071305`
const BOARD_TIME_FORMAT: &str = "%y%m%d%H%M";

// ==================== Requests ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatBody<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<&'a str>,
}

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct ConnectionsBody {
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_transfer_time: Option<u32>,
    pub trip_plan: String,
}

impl From<&ConnectionQuery> for ConnectionsBody {
    fn from(query: &ConnectionQuery) -> Self {
        Self {
            start: query.origin.clone(),
            end: query.destination.clone(),
            departure_time: query.departure_time.map(format_time),
            via: query.via.clone(),
            min_transfer_time: query.min_transfer_time,
            trip_plan: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PrePlanConnectionsBody<'a> {
    #[serde(rename = "prePlan")]
    pub pre_plan: &'a PrePlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    pub trip_plan: &'a str,
}

impl<'a> From<&'a PrePlan> for PrePlanConnectionsBody<'a> {
    fn from(pre_plan: &'a PrePlan) -> Self {
        let params = &pre_plan.search_params;
        Self {
            pre_plan,
            start: params.origin(),
            end: params.destination(),
            departure_time: params.departure_time.map(format_time),
            trip_plan: &pre_plan.message,
        }
    }
}

pub(crate) fn format_time(time: NaiveDateTime) -> String {
    time.format(WIRE_TIME_FORMAT).to_string()
}

/// Parse the timestamp shapes the backend is known to send.
///
/// Offsets are dropped: times are local to the station.
pub(crate) fn parse_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.naive_local());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(time);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

// ==================== Lenient scalars ====================

/// A scalar the backend sends either as a number or as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextOrNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Either a bare station name or a station object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StationDto {
    Named(String),
    Full {
        name: String,
        #[serde(
            default,
            alias = "evaNumber",
            alias = "eva_number",
            alias = "evaNr",
            alias = "eva_nr"
        )]
        eva: Option<TextOrNumber>,
    },
}

impl StationDto {
    fn into_station(self) -> StationRef {
        match self {
            Self::Named(name) => StationRef::named(name),
            Self::Full { name, eva: None } => StationRef::named(name),
            Self::Full {
                name,
                eva: Some(raw),
            } => {
                let raw = raw.into_text();
                match EvaCode::parse(raw.as_str()) {
                    Ok(eva) => StationRef::new(name, eva),
                    Err(_) => {
                        debug!("Ignoring invalid EVA code '{}' for {}", raw, name);
                        StationRef::named(name)
                    }
                }
            }
        }
    }
}

// ==================== Chat ====================

/// Text from a string or number; anything else decodes as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            debug!("Ignoring non-text value {}", other);
            None
        }
    })
}

/// Minutes from an integer, a whole float or a numeric string
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let minutes = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    }
    .and_then(|m| u32::try_from(m).ok());

    if minutes.is_none()
        && let Some(raw) = value
    {
        debug!("Ignoring unparseable transfer time {}", raw);
    }
    Ok(minutes)
}

/// Search parameters, or absent when the value has the wrong shape
fn lenient_params<'de, D>(deserializer: D) -> Result<Option<SearchParamsDto>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(params) => Some(params),
            Err(e) => {
                debug!("Ignoring malformed search parameters: {}", e);
                None
            }
        },
    })
}

/// Chat reply. Odd field types degrade to empty values so one bad field
/// never costs the message or the session id.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChatReplyDto {
    #[serde(default, deserialize_with = "lenient_text")]
    message: Option<String>,
    #[serde(default, alias = "sessionId", deserialize_with = "lenient_text")]
    session_id: Option<String>,
    #[serde(
        default,
        rename = "searchParams",
        alias = "search_params",
        deserialize_with = "lenient_params"
    )]
    search_params: Option<SearchParamsDto>,
}

impl ChatReplyDto {
    pub fn into_reply(self) -> ChatReply {
        ChatReply {
            message: self.message.unwrap_or_default(),
            session_id: self.session_id,
            search_params: self
                .search_params
                .map(SearchParamsDto::into_params)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParamsDto {
    #[serde(default, alias = "start", deserialize_with = "lenient_text")]
    origin: Option<String>,
    #[serde(default, alias = "end", deserialize_with = "lenient_text")]
    destination: Option<String>,
    #[serde(
        default,
        rename = "departureTime",
        alias = "departure_time",
        deserialize_with = "lenient_text"
    )]
    departure_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    via: Option<String>,
    #[serde(
        default,
        rename = "minTransferTime",
        alias = "min_transfer_time",
        deserialize_with = "lenient_minutes"
    )]
    min_transfer_time: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl SearchParamsDto {
    pub fn into_params(self) -> SearchParams {
        let departure_time = self.departure_time.as_deref().and_then(|raw| {
            let parsed = parse_time(raw);
            if parsed.is_none() {
                debug!("Ignoring unparseable departure time '{}'", raw);
            }
            parsed
        });
        SearchParams {
            origin: non_blank(self.origin),
            destination: non_blank(self.destination),
            departure_time,
            via: non_blank(self.via),
            min_transfer_time: self.min_transfer_time,
        }
    }
}

// ==================== Journeys ====================

/// A journey or departure that could not be turned into a domain value
#[derive(Debug, Error)]
pub(crate) enum EntryDecodeError {
    #[error("unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("unparseable departure time '{0}'")]
    DepartureTime(String),

    #[error("leg {leg}: unparseable {field} '{value}'")]
    Time {
        leg: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JourneyDto {
    #[serde(default)]
    id: Option<TextOrNumber>,
    #[serde(alias = "start_station")]
    start_station: StationDto,
    #[serde(alias = "end_station")]
    end_station: StationDto,
    #[serde(default)]
    legs: Vec<LegDto>,
    #[serde(default)]
    transfers: Option<u32>,
    #[serde(default, alias = "total_time")]
    total_time: u32,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegDto {
    origin: StationDto,
    destination: StationDto,
    train: TrainDto,
    #[serde(alias = "departure_time")]
    departure_time: String,
    #[serde(alias = "arrival_time")]
    arrival_time: String,
    #[serde(default, alias = "delay_in_minutes", alias = "delay")]
    delay_in_minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrainDto {
    #[serde(default)]
    name: String,
    #[serde(default, alias = "train_number", alias = "number")]
    train_number: Option<TextOrNumber>,
    #[serde(default, alias = "start_location")]
    start_location: Option<StationDto>,
    #[serde(default, alias = "end_location")]
    end_location: Option<StationDto>,
    #[serde(default, alias = "departure_time")]
    departure_time: Option<String>,
    #[serde(default, alias = "arrival_time")]
    arrival_time: Option<String>,
    #[serde(default)]
    stops: Vec<StopDto>,
    /// Older backends send the route as plain stations
    #[serde(default)]
    path: Vec<StationDto>,
    #[serde(default)]
    platform: Option<TextOrNumber>,
    #[serde(default)]
    wagons: Vec<TextOrNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StopDto {
    station: StationDto,
    #[serde(default, alias = "arrival_time")]
    arrival_time: Option<String>,
    #[serde(default, alias = "departure_time")]
    departure_time: Option<String>,
    #[serde(default)]
    platform: Option<TextOrNumber>,
}

fn required_time(
    raw: &str,
    leg: usize,
    field: &'static str,
) -> Result<NaiveDateTime, EntryDecodeError> {
    parse_time(raw).ok_or_else(|| EntryDecodeError::Time {
        leg,
        field,
        value: raw.to_string(),
    })
}

fn optional_time(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(parse_time)
}

impl LegDto {
    fn into_leg(self, index: usize) -> Result<Leg, EntryDecodeError> {
        let departure = required_time(&self.departure_time, index, "departure time")?;
        let arrival = required_time(&self.arrival_time, index, "arrival time")?;
        let origin = self.origin.into_station();
        let destination = self.destination.into_station();
        let train = self.train.into_train(&origin, &destination, departure, arrival);

        Ok(Leg {
            origin,
            destination,
            train,
            departure,
            arrival,
            // Early running counts as on time
            delay_minutes: self
                .delay_in_minutes
                .map(|minutes| u32::try_from(minutes).unwrap_or(0)),
        })
    }
}

impl TrainDto {
    /// Missing train endpoints and times fall back to the leg's own
    fn into_train(
        self,
        origin: &StationRef,
        destination: &StationRef,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
    ) -> Train {
        let stops = if self.stops.is_empty() {
            self.path
                .into_iter()
                .map(|station| StopEvent::at(station.into_station()))
                .collect()
        } else {
            self.stops.into_iter().map(StopDto::into_stop).collect()
        };

        Train {
            name: self.name,
            number: self
                .train_number
                .map(TextOrNumber::into_text)
                .unwrap_or_default(),
            start_location: self
                .start_location
                .map(StationDto::into_station)
                .unwrap_or_else(|| origin.clone()),
            end_location: self
                .end_location
                .map(StationDto::into_station)
                .unwrap_or_else(|| destination.clone()),
            departure: optional_time(self.departure_time.as_deref()).unwrap_or(departure),
            arrival: optional_time(self.arrival_time.as_deref()).unwrap_or(arrival),
            stops,
            platform: self.platform.map(TextOrNumber::into_text),
            wagons: self.wagons.into_iter().map(TextOrNumber::into_text).collect(),
        }
    }
}

impl StopDto {
    fn into_stop(self) -> StopEvent {
        StopEvent {
            station: self.station.into_station(),
            arrival: optional_time(self.arrival_time.as_deref()),
            departure: optional_time(self.departure_time.as_deref()),
            platform: self.platform.map(TextOrNumber::into_text),
        }
    }
}

fn decode_journey(value: Value, position: usize) -> Result<Journey, EntryDecodeError> {
    let dto: JourneyDto = serde_json::from_value(value)?;
    let legs = dto
        .legs
        .into_iter()
        .enumerate()
        .map(|(index, leg)| leg.into_leg(index))
        .collect::<Result<Vec<_>, _>>()?;
    let id = dto
        .id
        .map(TextOrNumber::into_text)
        .unwrap_or_else(|| position.to_string());

    let journey = Journey::new(
        id,
        dto.start_station.into_station(),
        dto.end_station.into_station(),
        legs,
        dto.total_time,
        dto.description,
    );
    Ok(match dto.transfers {
        Some(reported) => journey.with_reported_transfers(reported),
        None => journey,
    })
}

/// Normalise a connections response into journeys.
///
/// Accepts a bare array or an object with a `journeys` list. Journeys that
/// cannot be decoded are dropped and logged; order is preserved.
pub(crate) fn decode_journeys(body: Value) -> Result<Vec<Journey>, PlanningError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("journeys") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(PlanningError::Malformed(format!(
                    "journeys is not a list: {}",
                    other
                )));
            }
        },
        other => {
            return Err(PlanningError::Malformed(format!(
                "expected journeys, got {}",
                other
            )));
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match decode_journey(item, position) {
            Ok(journey) => Some(journey),
            Err(e) => {
                warn!("Dropping journey #{}: {}", position, e);
                None
            }
        })
        .collect())
}

// ==================== Stations ====================

/// Decode `{stations: [...]}` (or a bare array) into candidates.
///
/// Undecodable entries are skipped.
pub(crate) fn decode_stations(body: Value) -> Result<Vec<StationRef>, PlanningError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("stations") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(PlanningError::Malformed(format!(
                    "stations is not a list: {}",
                    other
                )));
            }
        },
        other => {
            return Err(PlanningError::Malformed(format!(
                "expected stations, got {}",
                other
            )));
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<StationDto>(item) {
            Ok(station) => Some(station.into_station()),
            Err(e) => {
                debug!("Skipping station entry: {}", e);
                None
            }
        })
        .collect())
}

// ==================== Live board ====================

/// Messages arrive as one string or as a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessagesDto {
    One(String),
    Many(Vec<Value>),
}

impl MessagesDto {
    fn into_messages(self) -> Vec<String> {
        let messages = match self {
            Self::One(message) => vec![message],
            Self::Many(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Object(mut map) => match map.remove("text") {
                        Some(Value::String(s)) => Some(s),
                        _ => None,
                    },
                    _ => None,
                })
                .collect(),
        };
        messages
            .into_iter()
            .filter(|message| !message.trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RealTimeDto {
    #[serde(default, deserialize_with = "lenient_text")]
    time: Option<String>,
    #[serde(default)]
    delay: Option<TextOrNumber>,
    #[serde(default)]
    platform: Option<TextOrNumber>,
    #[serde(default)]
    messages: Option<MessagesDto>,
}

#[derive(Debug, Deserialize)]
struct DepartureDto {
    #[serde(default)]
    id: Option<TextOrNumber>,
    #[serde(default)]
    train: Option<TextOrNumber>,
    #[serde(default)]
    direction: Option<String>,
    time: String,
    #[serde(default)]
    platform: Option<TextOrNumber>,
    #[serde(default)]
    real_time: Option<RealTimeDto>,
}

fn parse_board_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), BOARD_TIME_FORMAT)
        .ok()
        .or_else(|| parse_time(raw))
}

impl DepartureDto {
    fn into_departure(self, index: usize) -> Result<Departure, EntryDecodeError> {
        let planned = parse_board_time(&self.time)
            .ok_or_else(|| EntryDecodeError::DepartureTime(self.time.clone()))?;
        let real_time = self.real_time.unwrap_or_default();

        Ok(Departure {
            id: self
                .id
                .map(TextOrNumber::into_text)
                .unwrap_or_else(|| index.to_string()),
            train: self.train.map(TextOrNumber::into_text).unwrap_or_default(),
            direction: self.direction.unwrap_or_else(|| "Unknown".to_string()),
            planned,
            expected: real_time.time.as_deref().and_then(parse_board_time),
            // Early running counts as on time
            delay_minutes: real_time.delay.and_then(|delay| match delay {
                TextOrNumber::Integer(n) => Some(u32::try_from(n).unwrap_or(0)),
                TextOrNumber::Float(f) => Some(if f > 0.0 { f.round() as u32 } else { 0 }),
                TextOrNumber::Text(s) => s
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .map(|n| u32::try_from(n).unwrap_or(0)),
            }),
            planned_platform: self.platform.map(TextOrNumber::into_text),
            changed_platform: real_time.platform.map(TextOrNumber::into_text),
            messages: real_time
                .messages
                .map(MessagesDto::into_messages)
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct LiveBoardDto {
    #[serde(default, deserialize_with = "lenient_text")]
    station: Option<String>,
    #[serde(default)]
    eva: Option<TextOrNumber>,
    #[serde(default)]
    departures: Option<Vec<Value>>,
}

/// Decode a live board; departures with unreadable times are dropped
pub(crate) fn decode_live_board(
    requested: &str,
    body: Value,
) -> Result<DepartureBoard, PlanningError> {
    let dto: LiveBoardDto = serde_json::from_value(body)
        .map_err(|e| PlanningError::Malformed(format!("live board: {}", e)))?;

    let name = dto.station.unwrap_or_else(|| requested.to_string());
    let station = StationDto::Full {
        name,
        eva: dto.eva,
    }
    .into_station();

    let departures = dto
        .departures
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let decoded = serde_json::from_value::<DepartureDto>(item)
                .map_err(EntryDecodeError::from)
                .and_then(|dto| dto.into_departure(index));
            match decoded {
                Ok(departure) => Some(departure),
                Err(e) => {
                    warn!("Dropping departure {} at {}: {}", index, station, e);
                    None
                }
            }
        })
        .collect();

    Ok(DepartureBoard::new(station, departures))
}

// ==================== Status ====================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusDto {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TickerDto {
    #[serde(default)]
    pub messages: Vec<String>,
}

impl StatusDto {
    pub fn with_ticker(self, ticker: Vec<String>) -> BackendStatus {
        BackendStatus {
            status: self.status,
            services: self.services,
            ticker,
        }
    }
}
