//! Fatal startup errors.
//!
//! Per-request failures have their own types ([`crate::http::parser::BadRequest`],
//! [`crate::http::resolver::ResolveError`]) and never leave a connection.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to resolve {addr}: {source}")]
    Resolve {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create socket: {0}")]
    Socket(#[source] io::Error),

    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to listen on {addr}: {source}")]
    Listen {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ServerError {
    /// The OS error code behind a socket failure, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            ServerError::Resolve { source, .. }
            | ServerError::Bind { source, .. }
            | ServerError::Listen { source, .. } => source.raw_os_error(),
            ServerError::Socket(source) | ServerError::Spawn(source) => source.raw_os_error(),
            ServerError::Config(_) => None,
        }
    }
}
