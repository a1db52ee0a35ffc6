//! Room-based WebSocket chat relay.
//!
//! Clients connect over WebSocket, sign into named rooms and broadcast text
//! messages to the other members of the same room. The registry of live
//! connections and the message router form the core; the axum transport in
//! [`ui`] feeds them.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
