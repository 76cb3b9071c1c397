//! listkeeper HTTP server library
//!
//! Provides the REST API, configuration and store initialization for
//! reuse by the binary and by tests.

pub mod api;
pub mod config;
pub mod error;
pub mod store_loader;
pub mod telemetry;
