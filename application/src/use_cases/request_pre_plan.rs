//! Pre-plan service.
//!
//! Drives one chat turn: sends the user's utterance with the current
//! session token and turns the reply into a [`PrePlan`].
//!
//! # Session policy
//!
//! The first session id the backend hands out is kept for the rest of the
//! conversation. Later replies carrying a different id are ignored until
//! the session is explicitly cleared.

use crate::ports::chat_gateway::{ChatGateway, ChatRequest};
use crate::ports::planning_error::PlanningError;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use crate::use_cases::session_manager::SessionManager;
use std::sync::Arc;
use tracing::{debug, info, warn};
use travel_domain::{PrePlan, SessionToken, Utterance};

/// Service for negotiating a pre-plan over the chat protocol
pub struct PrePlanService {
    gateway: Arc<dyn ChatGateway>,
    session: Arc<SessionManager>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl PrePlanService {
    pub fn new(gateway: Arc<dyn ChatGateway>, session: Arc<SessionManager>) -> Self {
        Self {
            gateway,
            session,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Run one chat turn.
    ///
    /// Blank input is rejected before any request is made. Failures come back
    /// as `Err`; the error's display text is the diagnostic to show the user.
    pub async fn request_pre_plan(&self, utterance: &str) -> Result<PrePlan, PlanningError> {
        let utterance = Utterance::try_new(utterance)?;
        let request = ChatRequest {
            utterance,
            session_token: self.session.get(),
        };

        info!(
            "Requesting pre-plan ({})",
            match &request.session_token {
                Some(token) => format!("session {}", token),
                None => "new session".to_string(),
            }
        );

        let reply = match self.gateway.send_message(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat turn failed: {}", e);
                self.transcript.log(TranscriptEvent::new(
                    "chat_error",
                    serde_json::json!({
                        "utterance": request.utterance.content(),
                        "error": e.to_string(),
                    }),
                ));
                return Err(e);
            }
        };

        self.adopt_session(reply.session_id.as_deref());

        let pre_plan = PrePlan::new(reply.message, reply.search_params);
        debug!(
            "Pre-plan received, searchable: {}",
            pre_plan.is_searchable()
        );

        self.transcript.log(TranscriptEvent::new(
            "chat_turn",
            serde_json::json!({
                "utterance": request.utterance.content(),
                "session": self.session.get().map(String::from),
                "pre_plan": &pre_plan,
            }),
        ));

        Ok(pre_plan)
    }

    /// Apply first-session-wins to a session id from a reply
    fn adopt_session(&self, session_id: Option<&str>) {
        let Some(raw) = session_id else {
            return;
        };
        let Ok(token) = SessionToken::try_new(raw) else {
            debug!("Ignoring blank session id in chat reply");
            return;
        };

        if self.session.set_if_absent(token.clone()) {
            info!("Session {} established", token);
        } else if self.session.get().as_ref() != Some(&token) {
            debug!(
                "Ignoring session id {}: conversation already bound",
                token
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStorage, MockChatGateway, reply};
    use travel_domain::SearchParams;

    fn service(
        gateway: Arc<MockChatGateway>,
        storage: Arc<MemoryStorage>,
    ) -> (PrePlanService, Arc<SessionManager>) {
        let session = Arc::new(SessionManager::new(storage));
        (PrePlanService::new(gateway, session.clone()), session)
    }

    #[tokio::test]
    async fn test_first_turn_establishes_session() {
        let gateway = Arc::new(MockChatGateway::new(vec![Ok(reply(
            "When do you want to travel?",
            Some("abc123"),
            SearchParams::new("Berlin", "Hamburg"),
        ))]));
        let storage = Arc::new(MemoryStorage::new());
        let (service, session) = service(gateway.clone(), storage.clone());

        let plan = service
            .request_pre_plan("Berlin to Hamburg tomorrow")
            .await
            .unwrap();

        assert_eq!(plan.message, "When do you want to travel?");
        assert_eq!(plan.search_params.origin(), Some("Berlin"));
        assert_eq!(gateway.requests()[0].session_token, None);
        assert_eq!(session.get().unwrap().as_str(), "abc123");
        assert_eq!(storage.stored().unwrap().as_str(), "abc123");
    }

    #[tokio::test]
    async fn test_first_session_wins() {
        let gateway = Arc::new(MockChatGateway::new(vec![
            Ok(reply("one", Some("abc123"), SearchParams::default())),
            Ok(reply("two", Some("zzz999"), SearchParams::default())),
            Ok(reply("three", None, SearchParams::default())),
        ]));
        let (service, session) = service(gateway.clone(), Arc::new(MemoryStorage::new()));

        service.request_pre_plan("hello").await.unwrap();
        service.request_pre_plan("again").await.unwrap();
        service.request_pre_plan("and again").await.unwrap();

        assert_eq!(session.get().unwrap().as_str(), "abc123");
        let requests = gateway.requests();
        assert_eq!(requests[1].session_token.as_ref().unwrap().as_str(), "abc123");
        assert_eq!(requests[2].session_token.as_ref().unwrap().as_str(), "abc123");
    }

    #[tokio::test]
    async fn test_existing_session_is_sent_and_kept() {
        let gateway = Arc::new(MockChatGateway::new(vec![Ok(reply(
            "ok",
            Some("other"),
            SearchParams::default(),
        ))]));
        let (service, session) =
            service(gateway.clone(), Arc::new(MemoryStorage::with_token("persisted")));

        service.request_pre_plan("hi").await.unwrap();

        assert_eq!(
            gateway.requests()[0].session_token.as_ref().unwrap().as_str(),
            "persisted"
        );
        assert_eq!(session.get().unwrap().as_str(), "persisted");
    }

    #[tokio::test]
    async fn test_blank_utterance_never_sent() {
        let gateway = Arc::new(MockChatGateway::new(vec![]));
        let (service, _) = service(gateway.clone(), Arc::new(MemoryStorage::new()));

        let result = service.request_pre_plan("   ").await;

        assert!(matches!(result, Err(PlanningError::Validation(_))));
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_server_detail_is_the_diagnostic() {
        let gateway = Arc::new(MockChatGateway::new(vec![Err(PlanningError::Server {
            status: 500,
            detail: "AI service error: throttled".to_string(),
        })]));
        let (service, session) = service(gateway, Arc::new(MemoryStorage::new()));

        let error = service.request_pre_plan("hi").await.unwrap_err();

        assert_eq!(error.to_string(), "AI service error: throttled");
        assert_eq!(session.get(), None);
    }

    #[tokio::test]
    async fn test_blank_session_id_is_ignored() {
        let gateway = Arc::new(MockChatGateway::new(vec![Ok(reply(
            "ok",
            Some("  "),
            SearchParams::default(),
        ))]));
        let (service, session) = service(gateway, Arc::new(MemoryStorage::new()));

        service.request_pre_plan("hi").await.unwrap();
        assert_eq!(session.get(), None);
    }
}
