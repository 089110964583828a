//! Lazaret API Library
//!
//! This crate provides the HTTP delivery layer for the scanner: the
//! object-created event endpoint, health probes, and application setup.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
pub use state::AppState;
