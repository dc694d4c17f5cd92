//! Connection search gateway port

use super::planning_error::PlanningError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use travel_domain::{DomainError, Journey, PrePlan, SearchParams};

/// Validated connection query
///
/// Built from [`SearchParams`] with required endpoints and the
/// `via` / minimum-transfer rule already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionQuery {
    pub origin: String,
    pub destination: String,
    pub departure_time: Option<NaiveDateTime>,
    pub via: Option<String>,
    /// Only set together with `via`, and only when greater than zero
    pub min_transfer_time: Option<u32>,
}

impl ConnectionQuery {
    pub fn from_params(params: &SearchParams) -> Result<Self, DomainError> {
        let (origin, destination) = params.endpoints()?;
        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_time: params.departure_time,
            via: params.via_station().map(str::to_string),
            min_transfer_time: params.effective_min_transfer_time(),
        })
    }
}

/// Gateway for the connections endpoints
///
/// Journeys come back in backend order; adapters never reorder them.
#[async_trait]
pub trait ConnectionGateway: Send + Sync {
    /// Search by structured parameters
    async fn find_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<Vec<Journey>, PlanningError>;

    /// Search with a whole pre-plan as conversational context
    async fn find_connections_for_pre_plan(
        &self,
        pre_plan: &PrePlan,
    ) -> Result<Vec<Journey>, PlanningError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_drops_zero_transfer_time() {
        let params =
            SearchParams::new("Berlin Hbf", "München Hbf").with_via("Erfurt Hbf", Some(0));
        let query = ConnectionQuery::from_params(&params).unwrap();
        assert_eq!(query.via.as_deref(), Some("Erfurt Hbf"));
        assert_eq!(query.min_transfer_time, None);
    }

    #[test]
    fn test_query_keeps_positive_transfer_time_with_via() {
        let params =
            SearchParams::new("Berlin Hbf", "München Hbf").with_via("Erfurt Hbf", Some(12));
        let query = ConnectionQuery::from_params(&params).unwrap();
        assert_eq!(query.min_transfer_time, Some(12));
    }

    #[test]
    fn test_query_requires_endpoints() {
        let params = SearchParams {
            origin: Some("Berlin Hbf".into()),
            ..Default::default()
        };
        assert_eq!(
            ConnectionQuery::from_params(&params),
            Err(DomainError::MissingSearchField("destination"))
        );
    }
}
