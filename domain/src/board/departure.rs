//! Departure board entities

use crate::journey::station::StationRef;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One departure on a station board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    pub id: String,
    /// Train label, e.g. "ICE 1601" or a line name
    pub train: String,
    /// Final destination of the train
    pub direction: String,
    pub planned: NaiveDateTime,
    /// Changed departure time, when the backend reports one
    pub expected: Option<NaiveDateTime>,
    pub delay_minutes: Option<u32>,
    pub planned_platform: Option<String>,
    pub changed_platform: Option<String>,
    pub messages: Vec<String>,
}

impl Departure {
    pub fn departs_at(&self) -> NaiveDateTime {
        self.expected.unwrap_or(self.planned)
    }

    pub fn is_on_time(&self) -> bool {
        self.delay_minutes.unwrap_or(0) == 0
    }

    /// Platform the train actually leaves from
    pub fn platform(&self) -> Option<&str> {
        self.changed_platform
            .as_deref()
            .or(self.planned_platform.as_deref())
    }

    pub fn has_platform_change(&self) -> bool {
        match (&self.changed_platform, &self.planned_platform) {
            (Some(changed), Some(planned)) => changed != planned,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

/// Upcoming departures at one station, ordered by actual departure time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureBoard {
    pub station: StationRef,
    departures: Vec<Departure>,
}

impl DepartureBoard {
    pub fn new(station: StationRef, mut departures: Vec<Departure>) -> Self {
        departures.sort_by_key(Departure::departs_at);
        Self {
            station,
            departures,
        }
    }

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}
