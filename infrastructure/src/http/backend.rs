//! HTTP adapter for the planning backend
//!
//! One [`HttpBackend`] implements every gateway port over a shared
//! `reqwest::Client`.

use super::error::{decode, read_json, transport};
use super::wire::{
    ChatBody, ChatReplyDto, ConnectionsBody, PrePlanConnectionsBody, StatusDto, TickerDto,
    decode_journeys, decode_live_board, decode_stations,
};
use crate::config::FileBackendConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use travel_application::ports::chat_gateway::{ChatGateway, ChatReply, ChatRequest};
use travel_application::ports::connection_gateway::{ConnectionGateway, ConnectionQuery};
use travel_application::ports::live_board_gateway::LiveBoardGateway;
use travel_application::ports::planning_error::PlanningError;
use travel_application::ports::station_gateway::StationGateway;
use travel_application::ports::status_gateway::{BackendStatus, StatusGateway};
use travel_domain::{DepartureBoard, Journey, PrePlan, StationRef};

/// Header carrying the conversation's session token
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Planning backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    api_prefix: String,
    example_connections: bool,
}

impl HttpBackend {
    /// Create an adapter for `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("travel-assistant/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_prefix: "/api/v1".to_string(),
            example_connections: false,
        })
    }

    pub fn from_config(config: &FileBackendConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            config.base_url.as_str(),
            Duration::from_secs(config.timeout_seconds),
        )?
        .with_api_prefix(&config.api_prefix)
        .with_example_connections(config.example_connections))
    }

    pub fn with_api_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim().trim_end_matches('/');
        self.api_prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{}", prefix)
        };
        self
    }

    /// Send parameter searches to the canned example endpoint
    pub fn with_example_connections(mut self, enabled: bool) -> Self {
        self.example_connections = enabled;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    /// URL for `path` followed by one percent-encoded segment
    fn url_with_segment(
        &self,
        path: &str,
        segment: &str,
    ) -> Result<reqwest::Url, PlanningError> {
        let invalid = |reason: String| {
            PlanningError::Transport(format!("Invalid backend URL {}: {}", self.url(path), reason))
        };
        let mut url = reqwest::Url::parse(&self.url(path)).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, PlanningError> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, PlanningError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }
}

#[async_trait]
impl ChatGateway for HttpBackend {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, PlanningError> {
        let token = request.session_token.as_ref().map(|t| t.as_str());
        let body = ChatBody {
            message: request.utterance.content(),
            session_token: token,
        };

        let url = self.url("/chat");
        debug!("POST {}", url);
        let mut builder = self.client.post(&url).json(&body);
        if let Some(token) = token {
            builder = builder.header(SESSION_HEADER, token);
        }
        let response = builder.send().await.map_err(transport)?;

        let reply: ChatReplyDto = decode(read_json(response).await?)?;
        Ok(reply.into_reply())
    }
}

#[async_trait]
impl ConnectionGateway for HttpBackend {
    async fn find_connections(
        &self,
        query: &ConnectionQuery,
    ) -> Result<Vec<Journey>, PlanningError> {
        let path = if self.example_connections {
            "/connections/example"
        } else {
            "/connections"
        };
        let body = self.post_json(path, &ConnectionsBody::from(query)).await?;
        decode_journeys(body)
    }

    async fn find_connections_for_pre_plan(
        &self,
        pre_plan: &PrePlan,
    ) -> Result<Vec<Journey>, PlanningError> {
        let body = self
            .post_json("/connections", &PrePlanConnectionsBody::from(pre_plan))
            .await?;
        decode_journeys(body)
    }
}

#[async_trait]
impl StationGateway for HttpBackend {
    async fn search_stations(&self, query: &str) -> Result<Vec<StationRef>, PlanningError> {
        let body = self.get_json("/stations", &[("q", query)]).await?;
        decode_stations(body)
    }
}

#[async_trait]
impl LiveBoardGateway for HttpBackend {
    async fn departure_board(&self, station: &str) -> Result<DepartureBoard, PlanningError> {
        let url = self.url_with_segment("/live", station)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode_live_board(station, read_json(response).await?)
    }
}

#[async_trait]
impl StatusGateway for HttpBackend {
    async fn status(&self) -> Result<BackendStatus, PlanningError> {
        let status: StatusDto = decode(self.get_json("/status", &[]).await?)?;

        // Ticker failures degrade to an empty list
        let ticker = match self.get_json("/status/ticker", &[]).await {
            Ok(body) => decode::<TickerDto>(body)
                .map(|ticker| ticker.messages)
                .unwrap_or_default(),
            Err(e) => {
                warn!("Status ticker unavailable: {}", e);
                Vec::new()
            }
        };

        Ok(status.with_ticker(ticker))
    }
}
