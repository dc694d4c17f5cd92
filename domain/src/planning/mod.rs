//! Conversational planning domain.
//!
//! - [`utterance::Utterance`]: validated user text for one chat turn
//! - [`search_params::SearchParams`]: incrementally inferred journey criteria
//! - [`pre_plan::PrePlan`]: result of one chat turn

pub mod pre_plan;
pub mod search_params;
pub mod utterance;
