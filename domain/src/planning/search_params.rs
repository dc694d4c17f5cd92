//! Journey search criteria

use crate::core::error::DomainError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Journey search criteria (Value Object)
///
/// Every field is optional: the chat protocol fills them in incrementally,
/// so no field is guaranteed after any given turn. A search needs at least
/// `origin` and `destination`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    /// Minimum transfer time at `via`, in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_transfer_time: Option<u32>,
}

impl SearchParams {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            ..Default::default()
        }
    }

    pub fn departing_at(mut self, time: NaiveDateTime) -> Self {
        self.departure_time = Some(time);
        self
    }

    pub fn with_via(mut self, station: impl Into<String>, min_transfer_time: Option<u32>) -> Self {
        self.via = Some(station.into());
        self.min_transfer_time = min_transfer_time;
        self
    }

    /// Origin, if present and not blank
    pub fn origin(&self) -> Option<&str> {
        non_blank(&self.origin)
    }

    /// Destination, if present and not blank
    pub fn destination(&self) -> Option<&str> {
        non_blank(&self.destination)
    }

    /// Via station, if present and not blank
    pub fn via_station(&self) -> Option<&str> {
        non_blank(&self.via)
    }

    /// Whether both endpoints are known
    pub fn is_complete(&self) -> bool {
        self.origin().is_some() && self.destination().is_some()
    }

    /// Whether nothing has been inferred yet
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Return `(origin, destination)` or the first missing field
    pub fn endpoints(&self) -> Result<(&str, &str), DomainError> {
        let origin = self
            .origin()
            .ok_or(DomainError::MissingSearchField("origin"))?;
        let destination = self
            .destination()
            .ok_or(DomainError::MissingSearchField("destination"))?;
        Ok((origin, destination))
    }

    /// Minimum transfer time to send with a search.
    ///
    /// Only meaningful with a via station, and zero counts as unspecified.
    pub fn effective_min_transfer_time(&self) -> Option<u32> {
        self.via_station()?;
        self.min_transfer_time.filter(|minutes| *minutes > 0)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
