//! Station value objects

use crate::core::error::DomainError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Numeric station identifier (Value Object)
///
/// The EVA code is the stable join key across stations, legs and trains.
/// An empty code means the backend supplied a name only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaCode(String);

impl EvaCode {
    /// Parse a code, accepting ASCII digits only
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DomainError::InvalidEvaCode(value))
        }
    }

    /// Placeholder for stations known by name only
    pub fn unknown() -> Self {
        Self(String::new())
    }

    pub fn is_known(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EvaCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_known() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "?")
        }
    }
}

/// Reference to a station: display name plus EVA code
///
/// Names are presentation-only and may be ambiguous; compare stations
/// with [`StationRef::same_station`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRef {
    pub name: String,
    pub eva: EvaCode,
}

impl StationRef {
    pub fn new(name: impl Into<String>, eva: EvaCode) -> Self {
        Self {
            name: name.into(),
            eva,
        }
    }

    /// Station candidate without an EVA code
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, EvaCode::unknown())
    }

    /// Whether both references point at the same station (by EVA code)
    pub fn same_station(&self, other: &StationRef) -> bool {
        self.eva.is_known() && self.eva == other.eva
    }
}

impl std::fmt::Display for StationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.eva.is_known() {
            write!(f, "{} ({})", self.name, self.eva)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A train calling at an intermediate station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopEvent {
    pub station: StationRef,
    pub arrival: Option<NaiveDateTime>,
    pub departure: Option<NaiveDateTime>,
    pub platform: Option<String>,
}

impl StopEvent {
    pub fn at(station: StationRef) -> Self {
        Self {
            station,
            arrival: None,
            departure: None,
            platform: None,
        }
    }
}
