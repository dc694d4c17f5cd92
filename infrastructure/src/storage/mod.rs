//! Session storage adapters
//!
//! Implementations of the [`SessionStorage`](travel_application::SessionStorage)
//! port: a JSON file in the platform data directory, and an in-memory
//! variant for ephemeral runs.

mod file_storage;
mod memory_storage;

pub use file_storage::{FileSessionStorage, SESSION_TOKEN_KEY};
pub use memory_storage::InMemorySessionStorage;
