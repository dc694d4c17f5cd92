//! HTTP adapters for the planning backend

mod backend;
mod error;
mod wire;

pub use backend::{HttpBackend, SESSION_HEADER};
