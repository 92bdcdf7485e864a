//! # mcc-server
//!
//! HTTP API for the MCP Control Center, plus the pieces the `mcc` binary
//! shares with it (application state, demo seeding).

pub mod api;
pub mod seed;
pub mod state;

pub use api::create_router;
pub use state::AppState;
