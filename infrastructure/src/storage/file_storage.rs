//! File-backed session storage
//!
//! The file holds a flat JSON object. Only [`SESSION_TOKEN_KEY`] is read or
//! written; other keys are preserved untouched.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;
use travel_application::ports::session_storage::{SessionStorage, StorageError};
use travel_domain::SessionToken;

/// Key under which the session token is stored
pub const SESSION_TOKEN_KEY: &str = "travel_assistant.session_token";

/// Session token persisted to a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/travel-assistant/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("travel-assistant").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(StorageError::Corrupt(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StorageError::Corrupt(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_entries(&self, entries: Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        let entries = self.read_entries()?;
        match entries.get(SESSION_TOKEN_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) => match SessionToken::try_new(token.as_str()) {
                Ok(token) => Ok(Some(token)),
                Err(_) => {
                    debug!("Ignoring blank session token in {}", self.path.display());
                    Ok(None)
                }
            },
            Some(other) => Err(StorageError::Corrupt(format!(
                "{} is not a string: {}",
                SESSION_TOKEN_KEY, other
            ))),
        }
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        // An unreadable file is replaced rather than blocking the save
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(
            SESSION_TOKEN_KEY.to_string(),
            Value::String(token.as_str().to_string()),
        );
        self.write_entries(entries)
    }

    fn remove(&self) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        if entries.remove(SESSION_TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(entries)
    }
}
