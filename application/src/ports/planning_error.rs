//! Typed failure at every service boundary
//!
//! Services return `Result<_, PlanningError>` instead of throwing; the
//! store decides how to render each kind. The `Display` text is the
//! user-facing diagnostic.

use thiserror::Error;
use travel_domain::DomainError;

/// Broad category of a [`PlanningError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any network call
    Validation,
    /// Network unreachable, timeout, connection reset
    Transport,
    /// Non-2xx response from the backend
    Server,
    /// Body could not be decoded
    Malformed,
}

/// Errors returned by planning services and backend gateways
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transport(String),

    /// `detail` is the server-provided detail, or a status line when absent
    #[error("{detail}")]
    Server { status: u16, detail: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl PlanningError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanningError::Validation(_) => ErrorKind::Validation,
            PlanningError::Transport(_) => ErrorKind::Transport,
            PlanningError::Server { .. } => ErrorKind::Server,
            PlanningError::Malformed(_) => ErrorKind::Malformed,
        }
    }

    /// Whether the request never left the client
    pub fn is_local(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<DomainError> for PlanningError {
    fn from(error: DomainError) -> Self {
        PlanningError::Validation(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_detail_only() {
        let error = PlanningError::Server {
            status: 500,
            detail: "backend down".to_string(),
        };
        assert_eq!(error.to_string(), "backend down");
        assert_eq!(error.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_transport_error_displays_transport_text() {
        let error = PlanningError::Transport("connection refused".to_string());
        assert_eq!(error.to_string(), "connection refused");
        assert!(!error.is_local());
    }

    #[test]
    fn test_domain_error_becomes_validation() {
        let error: PlanningError = DomainError::MissingSearchField("origin").into();
        assert!(error.is_local());
        assert_eq!(error.to_string(), "Missing required search field: origin");
    }
}
