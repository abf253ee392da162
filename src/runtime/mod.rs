//! Application lifecycle and execution modes
//!
//! - `lifetime`: startup preparation and graceful shutdown
//! - `modes`: the HTTP server entry point

pub mod lifetime;
pub mod modes;
