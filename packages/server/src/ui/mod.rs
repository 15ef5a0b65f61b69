//! Axum surface: WebSocket endpoint, read-only HTTP API, server runner.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, run_server, serve};
