//! Journey domain.
//!
//! - [`station::StationRef`]: station reference keyed by EVA code
//! - [`entities::Journey`]: one complete trip option made of [`entities::Leg`]s
//! - [`defect::JourneyDefect`]: invariant violations reported by the backend data

pub mod defect;
pub mod entities;
pub mod station;
