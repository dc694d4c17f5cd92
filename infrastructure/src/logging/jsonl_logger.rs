//! JSONL file writer for transcript events.
//!
//! Each [`TranscriptEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.
//! Existing transcripts are extended, so one file can span several runs.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use travel_application::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};

/// JSONL transcript logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and
/// on `Drop`.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Open (or create) the transcript at `path` for appending.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: TranscriptEvent, timestamp: String) -> serde_json::Value {
    match event.payload {
        serde_json::Value::Object(mut map) => {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert("timestamp".to_string(), serde_json::Value::String(timestamp));
            serde_json::Value::Object(map)
        }
        payload => serde_json::json!({
            "type": event.event_type,
            "timestamp": timestamp,
            "data": payload,
        }),
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&record(event, timestamp)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "chat_turn",
            serde_json::json!({ "utterance": "Berlin to Hamburg", "session": "abc123" }),
        ));
        logger.log(TranscriptEvent::new(
            "connection_search",
            serde_json::json!({ "journeys": ["j1"] }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "chat_turn");
        assert_eq!(lines[0]["session"], "abc123");
        assert!(lines[0]["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(lines[1]["type"], "connection_search");
        assert_eq!(lines[1]["journeys"][0], "j1");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();

        logger.log(TranscriptEvent::new("note", serde_json::json!("just a string")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("transcript.jsonl");

        for turn in ["first", "second"] {
            let logger = JsonlTranscriptLogger::open(&path).unwrap();
            logger.log(TranscriptEvent::new(
                "chat_turn",
                serde_json::json!({ "utterance": turn }),
            ));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["utterance"], "second");
    }
}
