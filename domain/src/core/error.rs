//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Utterance cannot be empty")]
    EmptyUtterance,

    #[error("Session token cannot be empty")]
    EmptySessionToken,

    #[error("Missing required search field: {0}")]
    MissingSearchField(&'static str),

    #[error("Invalid EVA code: {0}")]
    InvalidEvaCode(String),
}
