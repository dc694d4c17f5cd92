//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording planning events
//! (chat turns, connection searches, station lookups) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! transcript (JSONL).

use serde_json::Value;

/// A structured transcript event.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "chat_turn", "connection_search").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write failures.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
