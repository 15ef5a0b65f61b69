//! Room membership and broadcast server.
//!
//! Tracks which connection belongs to which chat room and fans events out to
//! a room or to every connection. Layers follow the usual layout:
//! `domain` (types and capabilities), `usecase` (join / leave / send /
//! announce), `infrastructure` (in-memory registry, in-memory transport hub,
//! DTOs) and `ui` (axum routes).

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{build_router, run_server, serve};
