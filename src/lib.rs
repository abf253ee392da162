//! Snaplink - A small URL shortener service
//!
//! This library provides the storage layer for shortened URLs together with
//! the HTTP service that exposes it.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **metrics**: Prometheus metrics export
//! - **full**: All features enabled
//!
//! # Architecture
//! - `storage`: the `Store` trait with in-memory and SQLite backends
//! - `api`: HTTP services and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization
//! - `utils`: ID generation and URL validation

#[macro_use]
mod metrics_macros;

pub mod api;
pub mod config;
pub mod errors;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
