//! Live departure board domain.
//!
//! - [`departure::DepartureBoard`]: upcoming departures at one station
//! - [`departure::Departure`]: one scheduled departure with its real-time changes

pub mod departure;
