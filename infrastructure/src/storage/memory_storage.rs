//! Process-local session storage

use std::sync::{Mutex, PoisonError};
use travel_application::ports::session_storage::{SessionStorage, StorageError};
use travel_domain::SessionToken;

/// Storage that forgets everything when the process exits
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    token: Mutex<Option<SessionToken>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
