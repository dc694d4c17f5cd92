//! Conversation session domain.
//!
//! - [`token::SessionToken`]: opaque identifier binding chat turns into one conversation

pub mod token;
