//! Domain layer for travel-assistant
//!
//! This crate contains the core entities and value objects of conversational
//! trip planning. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Pre-plan
//!
//! Each chat turn yields a [`PrePlan`]: the assistant's reply plus the
//! [`SearchParams`] inferred so far. Parameters fill in incrementally, so
//! any of them may be missing after a given turn.
//!
//! ## Journey
//!
//! A [`Journey`] is one trip option: an ordered chain of [`Leg`]s, each
//! ridden on one [`Train`]. Stations are joined by [`EvaCode`], never by
//! name. Broken invariants surface as [`JourneyDefect`]s.
//!
//! ## Departure board
//!
//! A [`DepartureBoard`] lists a station's upcoming [`Departure`]s with their
//! real-time delays and platform changes.
//!
//! ## Session
//!
//! A [`SessionToken`] binds successive chat turns into one conversation.

pub mod board;
pub mod config;
pub mod core;
pub mod journey;
pub mod planning;
pub mod session;

// Re-export commonly used types
pub use board::departure::{Departure, DepartureBoard};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use journey::{
    defect::JourneyDefect,
    entities::{Journey, Leg, Train},
    station::{EvaCode, StationRef, StopEvent},
};
pub use planning::{pre_plan::PrePlan, search_params::SearchParams, utterance::Utterance};
pub use session::token::SessionToken;
