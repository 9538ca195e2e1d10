//! gasguard-api: HTTP API layer for GasGuard
//!
//! Exposes the route scorer to the web frontend.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::ApiError;
pub use server::*;
pub use state::AppState;
