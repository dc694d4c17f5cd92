//! Logging infrastructure: structured transcript logging.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`TranscriptLogger`](travel_application::TranscriptLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
