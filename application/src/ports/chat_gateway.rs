//! Chat gateway port
//!
//! One chat turn against the planning backend's NLU endpoint.

use super::planning_error::PlanningError;
use async_trait::async_trait;
use travel_domain::{SearchParams, SessionToken, Utterance};

/// Outgoing chat turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub utterance: Utterance,
    /// Current conversation, `None` to start a new one
    pub session_token: Option<SessionToken>,
}

/// Decoded chat reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub message: String,
    /// Raw session id, if the backend sent one
    pub session_id: Option<String>,
    pub search_params: SearchParams,
}

/// Gateway for the chat endpoint
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one utterance and decode the reply
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, PlanningError>;
}
