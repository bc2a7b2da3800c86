//! Job board client core: REST access, token session, client-side state and
//! the screen flows that tie them together.

pub mod controller;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;
pub mod store;

pub use error::ClientError;
pub use reqwest::StatusCode;
pub use http::{ApiClient, DEFAULT_API_URL};
pub use session::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStore};
pub use store::{AppState, Store};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
