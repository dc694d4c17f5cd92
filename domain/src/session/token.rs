//! Session token value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a multi-turn planning conversation (Value Object)
///
/// The backend chooses the format; the client only requires it to be
/// non-empty. Absence of a token means "start a new conversation".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Try to create a token, rejecting empty or whitespace-only input
    pub fn try_new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(DomainError::EmptySessionToken)
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_opaque() {
        let token = SessionToken::try_new("abc123").unwrap();
        assert_eq!(token.as_str(), "abc123");

        // No format validation beyond non-empty
        assert!(SessionToken::try_new("not a uuid / anything ✓").is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(
            SessionToken::try_new(""),
            Err(DomainError::EmptySessionToken)
        );
        assert!(SessionToken::try_new("   ").is_err());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let token = SessionToken::try_new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc123\"");

        let parsed: SessionToken = serde_json::from_str("\"xyz\"").unwrap();
        assert_eq!(parsed.as_str(), "xyz");
        assert!(serde_json::from_str::<SessionToken>("\"\"").is_err());
    }
}
