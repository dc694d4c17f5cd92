//! Durable session storage port
//!
//! Holds the single session-token entry that survives process restarts.

use thiserror::Error;
use travel_domain::SessionToken;

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage data: {0}")]
    Corrupt(String),
}

/// Key-value storage for the session token
///
/// Implementations live in the infrastructure layer. Callers treat every
/// error as non-fatal.
pub trait SessionStorage: Send + Sync {
    /// Read the persisted token, if any
    fn load(&self) -> Result<Option<SessionToken>, StorageError>;

    /// Persist the token, replacing any previous one
    fn save(&self, token: &SessionToken) -> Result<(), StorageError>;

    /// Remove the persisted token
    fn remove(&self) -> Result<(), StorageError>;
}
