#![deny(missing_docs)]

//! Core library for the in-memory articles HTTP server.

/// HTTP routing and REST handlers.
pub mod api;
/// Article model and the mutex-guarded in-memory store.
pub mod articles;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
