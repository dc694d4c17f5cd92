//! Journey domain entities

use super::defect::JourneyDefect;
use super::station::{StationRef, StopEvent};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The physical service carrying a leg
///
/// `start_location` / `end_location` are the train's own terminals and may
/// extend beyond the leg it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    pub name: String,
    pub number: String,
    pub start_location: StationRef,
    pub end_location: StationRef,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    /// Intermediate stops in calling order
    pub stops: Vec<StopEvent>,
    pub platform: Option<String>,
    pub wagons: Vec<String>,
}

/// One uninterrupted ride on a single train (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub origin: StationRef,
    pub destination: StationRef,
    pub train: Train,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    /// Delay in minutes; `None` or zero means on time
    pub delay_minutes: Option<u32>,
}

impl Leg {
    /// Scheduled travel span in minutes (negative if the data is inconsistent)
    pub fn travel_minutes(&self) -> i64 {
        (self.arrival - self.departure).num_minutes()
    }

    pub fn is_on_time(&self) -> bool {
        self.delay_minutes.unwrap_or(0) == 0
    }
}

/// One complete trip option (Entity)
///
/// Legs are stored in chronological travel order and are not reorderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub id: String,
    pub start_station: StationRef,
    pub end_station: StationRef,
    legs: Vec<Leg>,
    pub total_minutes: u32,
    pub description: String,
    /// Transfer count as reported by the backend, kept for defect checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reported_transfers: Option<u32>,
}

impl Journey {
    pub fn new(
        id: impl Into<String>,
        start_station: StationRef,
        end_station: StationRef,
        legs: Vec<Leg>,
        total_minutes: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_station,
            end_station,
            legs,
            total_minutes,
            description: description.into(),
            reported_transfers: None,
        }
    }

    /// Record the transfer count the backend claimed for this journey
    pub fn with_reported_transfers(mut self, transfers: u32) -> Self {
        self.reported_transfers = Some(transfers);
        self
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of changes: always `legs.len() - 1`
    pub fn transfers(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    pub fn reported_transfers(&self) -> Option<u32> {
        self.reported_transfers
    }

    /// Sum of the per-leg travel spans, in minutes
    pub fn travel_minutes(&self) -> i64 {
        self.legs.iter().map(Leg::travel_minutes).sum()
    }

    pub fn departure(&self) -> Option<NaiveDateTime> {
        self.legs.first().map(|leg| leg.departure)
    }

    pub fn arrival(&self) -> Option<NaiveDateTime> {
        self.legs.last().map(|leg| leg.arrival)
    }

    /// Largest delay over all legs
    pub fn max_delay_minutes(&self) -> u32 {
        self.legs
            .iter()
            .filter_map(|leg| leg.delay_minutes)
            .max()
            .unwrap_or(0)
    }

    /// Every invariant this journey violates. Data is never repaired.
    pub fn defects(&self) -> Vec<JourneyDefect> {
        JourneyDefect::check(self)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::journey::station::EvaCode;
    use chrono::NaiveDate;

    pub fn station(name: &str, eva: &str) -> StationRef {
        StationRef::new(name, EvaCode::parse(eva).unwrap())
    }

    pub fn time(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 7)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    pub fn leg(
        from: StationRef,
        to: StationRef,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
    ) -> Leg {
        Leg {
            train: Train {
                name: "ICE".to_string(),
                number: "ICE 1234".to_string(),
                start_location: from.clone(),
                end_location: to.clone(),
                departure,
                arrival,
                stops: vec![],
                platform: Some("8".to_string()),
                wagons: vec![],
            },
            origin: from,
            destination: to,
            departure,
            arrival,
            delay_minutes: None,
        }
    }

    /// Berlin -> Hannover -> Hamburg, one change
    pub fn two_leg_journey() -> Journey {
        let berlin = station("Berlin Hbf", "8011160");
        let hannover = station("Hannover Hbf", "8000152");
        let hamburg = station("Hamburg Hbf", "8002549");
        Journey::new(
            "j-1",
            berlin.clone(),
            hamburg.clone(),
            vec![
                leg(berlin, hannover.clone(), time(8, 0), time(9, 40)),
                leg(hannover, hamburg, time(9, 55), time(11, 10)),
            ],
            190,
            "Berlin to Hamburg via Hannover",
        )
        .with_reported_transfers(1)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_transfers_is_legs_minus_one() {
        let journey = two_leg_journey();
        assert_eq!(journey.legs().len(), 2);
        assert_eq!(journey.transfers(), 1);

        for n in 0usize..5 {
            let a = station("A", "1");
            let legs = (0..n)
                .map(|_| leg(a.clone(), a.clone(), time(8, 0), time(9, 0)))
                .collect::<Vec<_>>();
            let journey = Journey::new("x", a.clone(), a, legs, 60 * n as u32, "");
            assert_eq!(journey.transfers(), n.saturating_sub(1));
        }
    }

    #[test]
    fn test_travel_minutes_sums_legs() {
        let journey = two_leg_journey();
        assert_eq!(journey.travel_minutes(), 100 + 75);
        assert_eq!(journey.departure(), Some(time(8, 0)));
        assert_eq!(journey.arrival(), Some(time(11, 10)));
    }

    #[test]
    fn test_delay_absent_or_zero_is_on_time() {
        let mut journey = two_leg_journey();
        assert!(journey.legs()[0].is_on_time());
        assert_eq!(journey.max_delay_minutes(), 0);

        journey.legs[0].delay_minutes = Some(0);
        assert!(journey.legs()[0].is_on_time());

        journey.legs[1].delay_minutes = Some(12);
        assert!(!journey.legs()[1].is_on_time());
        assert_eq!(journey.max_delay_minutes(), 12);
    }

    #[test]
    fn test_well_formed_journey_has_no_defects() {
        assert!(two_leg_journey().defects().is_empty());
    }
}
