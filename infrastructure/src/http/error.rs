//! Response handling shared by every endpoint
//!
//! Maps transport failures, non-2xx statuses and undecodable bodies onto
//! [`PlanningError`].

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use travel_application::ports::planning_error::PlanningError;

pub(crate) fn transport(error: reqwest::Error) -> PlanningError {
    if error.is_timeout() {
        PlanningError::Transport(format!("Request timed out: {}", error))
    } else if error.is_connect() {
        PlanningError::Transport(format!("Could not reach backend: {}", error))
    } else {
        PlanningError::Transport(error.to_string())
    }
}

/// Server detail from an error body, else `HTTP <code> <reason>`.
///
/// `detail` may be a string or any structured value; structured values are
/// rendered as compact JSON.
pub(crate) fn server_error(status: StatusCode, body: &str) -> PlanningError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|mut value| value.get_mut("detail").map(Value::take))
        .and_then(|detail| match detail {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| {
            format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });

    PlanningError::Server {
        status: status.as_u16(),
        detail,
    }
}

/// Read a response body as JSON, turning failures into typed errors
pub(crate) async fn read_json(response: Response) -> Result<Value, PlanningError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if !status.is_success() {
        debug!("Backend answered {}: {}", status, body);
        return Err(server_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| PlanningError::Malformed(e.to_string()))
}

/// Decode a JSON value into a DTO
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, PlanningError> {
    serde_json::from_value(value).map_err(|e| PlanningError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let error = server_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "backend down"}"#,
        );
        assert_eq!(error.to_string(), "backend down");
        assert_eq!(
            error,
            PlanningError::Server {
                status: 500,
                detail: "backend down".to_string()
            }
        );
    }

    #[test]
    fn test_structured_detail_is_stringified() {
        let error = server_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "start"], "msg": "field required"}]}"#,
        );
        let text = error.to_string();
        assert!(text.contains("field required"));
        assert!(text.starts_with('['));
    }

    #[test]
    fn test_missing_detail_falls_back_to_status_line() {
        let error = server_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(error.to_string(), "HTTP 502 Bad Gateway");

        let error = server_error(StatusCode::SERVICE_UNAVAILABLE, r#"{"detail": ""}"#);
        assert_eq!(error.to_string(), "HTTP 503 Service Unavailable");
    }
}
