//! Pre-plan entity

use super::search_params::SearchParams;
use serde::{Deserialize, Serialize};

/// Structured result of one chat turn
///
/// Combines the assistant's reply with the search parameters inferred from
/// the conversation so far. Replaced wholesale on every turn; any merging
/// across turns happens server-side.
///
/// A failed turn is still a `PrePlan` (see [`PrePlan::failure`]) so the UI
/// always has a message to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrePlan {
    pub message: String,
    #[serde(default)]
    pub search_params: SearchParams,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    failed: bool,
}

impl PrePlan {
    pub fn new(message: impl Into<String>, search_params: SearchParams) -> Self {
        Self {
            message: message.into(),
            search_params,
            failed: false,
        }
    }

    /// Failure marker carrying a user-facing diagnostic
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            search_params: SearchParams::default(),
            failed: true,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failed
    }

    /// Whether this pre-plan can be resolved into journeys
    pub fn is_searchable(&self) -> bool {
        !self.failed && self.search_params.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_marker() {
        let plan = PrePlan::failure("backend down");
        assert!(plan.is_failure());
        assert!(!plan.is_searchable());
        assert_eq!(plan.message, "backend down");
        assert!(plan.search_params.is_empty());
    }

    #[test]
    fn test_searchable_needs_endpoints() {
        let partial = PrePlan::new(
            "When do you want to travel?",
            SearchParams {
                origin: Some("Berlin".into()),
                ..Default::default()
            },
        );
        assert!(!partial.is_searchable());

        let complete = PrePlan::new("Found it", SearchParams::new("Berlin", "Hamburg"));
        assert!(complete.is_searchable());
    }

    #[test]
    fn test_serialization_omits_success_marker() {
        let plan = PrePlan::new("Hi", SearchParams::new("A", "B"));
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["message"], "Hi");
        assert_eq!(json["searchParams"]["origin"], "A");
        assert!(json.get("failed").is_none());

        let failed = serde_json::to_value(PrePlan::failure("x")).unwrap();
        assert_eq!(failed["failed"], true);
    }
}
