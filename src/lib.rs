//! Hostel - Multi-host static file server
//!
//! Core library: HTTP parsing, per-host file resolution and the
//! thread-pool dispatch engine.

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod server;
