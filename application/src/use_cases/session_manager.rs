//! Session manager
//!
//! Owns the conversation's session token: one in-memory copy that all reads
//! use, mirrored to durable storage on `set` / `clear`.

use crate::ports::session_storage::SessionStorage;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};
use travel_domain::SessionToken;

/// Owner of the current session token
///
/// Storage failures are logged and ignored: the in-memory value stays
/// authoritative for the lifetime of the process.
pub struct SessionManager {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<SessionToken>>,
}

impl SessionManager {
    /// Create a manager, restoring a token persisted by an earlier run
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let restored = match storage.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not restore session token: {}", e);
                None
            }
        };
        if let Some(token) = &restored {
            debug!("Restored session {}", token);
        }

        Self {
            storage,
            current: RwLock::new(restored),
        }
    }

    /// Current token, `None` when no conversation is active
    pub fn get(&self) -> Option<SessionToken> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store a token in memory and durable storage
    pub fn set(&self, token: SessionToken) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        self.persist(&token);
    }

    /// Store a token only if none is set yet. Returns whether it was stored.
    pub fn set_if_absent(&self, token: SessionToken) -> bool {
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if current.is_some() {
                return false;
            }
            *current = Some(token.clone());
        }
        self.persist(&token);
        true
    }

    /// Forget the token in memory and durable storage
    pub fn clear(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = previous {
            info!("Cleared session {}", token);
        }
        if let Err(e) = self.storage.remove() {
            warn!("Could not remove persisted session token: {}", e);
        }
    }

    fn persist(&self, token: &SessionToken) {
        if let Err(e) = self.storage.save(token) {
            warn!("Could not persist session token: {}", e);
        }
    }
}
