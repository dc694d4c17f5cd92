//! Utterance value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Free-text user input for one planning turn (Value Object)
///
/// Empty or whitespace-only input is never sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    content: String,
}

impl Utterance {
    /// Try to create a new utterance, rejecting blank input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyUtterance)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the utterance content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utterance_creation() {
        let u = Utterance::try_new("Berlin to Hamburg tomorrow").unwrap();
        assert_eq!(u.content(), "Berlin to Hamburg tomorrow");
    }

    #[test]
    fn test_try_new_blank() {
        assert_eq!(Utterance::try_new(""), Err(DomainError::EmptyUtterance));
        assert!(Utterance::try_new("  \t\n").is_err());
    }

    #[test]
    fn test_content_is_kept_verbatim() {
        let u = Utterance::try_new("  Köln  ").unwrap();
        assert_eq!(u.content(), "  Köln  ");
    }
}
