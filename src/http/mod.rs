//! HTTP protocol implementation.
//!
//! A restricted HTTP/1.1 subset: one request per connection, GET and POST
//! only, answered with a status line and the body of a static file.
//!
//! # Architecture
//!
//! - **`connection`**: Owns one client stream and drives it through the state machine below
//! - **`parser`**: Turns the raw request bytes into a [`request::Request`]
//! - **`request`**: HTTP request representation
//! - **`resolver`**: Maps a request to `<root>/<host>/<path>` and loads the file
//! - **`response`**: HTTP response representation and status codes
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read of at most 8192 bytes
//!        └──────┬──────┘
//!               │ Request parsed (or collapsed to INVALID)
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │ ← Resolve and load the file
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Stream dropped
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hostel::http::connection::Connection;
//! use hostel::http::resolver::FileResolver;
//!
//! let resolver = Arc::new(FileResolver::new("/srv/www"));
//! let listener = std::net::TcpListener::bind("127.0.0.1:8080")?;
//! for stream in listener.incoming() {
//!     Connection::new(stream?, Arc::clone(&resolver)).process();
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod resolver;
pub mod response;
pub mod writer;
