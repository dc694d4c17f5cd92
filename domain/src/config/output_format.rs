//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for pre-plans and journeys
///
/// This is a domain concept representing how results should be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every leg with train, platform and intermediate stops
    Full,
    /// One line per journey (default)
    #[default]
    Summary,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_summary() {
        assert_eq!(OutputFormat::default(), OutputFormat::Summary);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Full).unwrap();
        assert_eq!(json, "\"full\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
