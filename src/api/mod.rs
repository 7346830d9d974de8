//! HTTP surface of the chat service.
//!
//! `api_router()` returns a composable `Router`; `server` binds it and
//! manages the serving task. The chat handler is mounted at `/chat` and
//! again under `/api/` next to the health and vocabulary endpoints.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;
