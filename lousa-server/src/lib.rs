//! Lousa server library
//!
//! HTTP and WebSocket front-end for the call board. The binary in
//! `main.rs` wires these modules together; they are exported for
//! integration testing.

pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod ws;

pub use config::{AsyncMode, Cli, ServerConfig};
pub use routes::build_router;
pub use state::AppState;
