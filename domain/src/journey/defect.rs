//! Journey invariant checks
//!
//! Violations indicate a backend defect. They are reported, never repaired.

use super::entities::Journey;
use super::station::StationRef;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A violated journey invariant
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JourneyDefect {
    #[error("journey has no legs")]
    NoLegs,

    #[error("backend reported {reported} transfers but journey has {actual}")]
    TransferCountMismatch { reported: u32, actual: usize },

    #[error("leg {index} arrives at {arrival} but the next leg departs from {departure}")]
    DiscontiguousLegs {
        index: usize,
        arrival: StationRef,
        departure: StationRef,
    },

    #[error("leg {index} arrives before it departs")]
    NegativeLegSpan { index: usize },

    #[error("total time {total} min is shorter than {travelled} min spent travelling")]
    TotalTimeTooShort { total: u32, travelled: i64 },
}

impl JourneyDefect {
    /// Collect every defect of a journey
    pub fn check(journey: &Journey) -> Vec<JourneyDefect> {
        let legs = journey.legs();
        let mut defects = Vec::new();

        if legs.is_empty() {
            defects.push(JourneyDefect::NoLegs);
            return defects;
        }

        if let Some(reported) = journey.reported_transfers()
            && reported as usize != journey.transfers()
        {
            defects.push(JourneyDefect::TransferCountMismatch {
                reported,
                actual: journey.transfers(),
            });
        }

        for (index, pair) in legs.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            if !continues_at(&current.destination, &next.origin) {
                defects.push(JourneyDefect::DiscontiguousLegs {
                    index,
                    arrival: current.destination.clone(),
                    departure: next.origin.clone(),
                });
            }
        }

        for (index, leg) in legs.iter().enumerate() {
            if leg.travel_minutes() < 0 {
                defects.push(JourneyDefect::NegativeLegSpan { index });
            }
        }

        let travelled = journey.travel_minutes();
        if i64::from(journey.total_minutes) < travelled {
            defects.push(JourneyDefect::TotalTimeTooShort {
                total: journey.total_minutes,
                travelled,
            });
        }

        defects
    }
}

/// Whether the next leg starts where the previous one ended.
///
/// EVA codes decide when both sides carry one; otherwise the names must match.
fn continues_at(arrival: &StationRef, departure: &StationRef) -> bool {
    if arrival.eva.is_known() && departure.eva.is_known() {
        return arrival.eva == departure.eva;
    }
    arrival.name.trim().to_lowercase() == departure.name.trim().to_lowercase()
}
