//! Execution modes
//!
//! Only the HTTP server mode exists; it is compiled with the `server` feature.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub use server::run_server;
