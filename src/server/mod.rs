//! Accept loop, dispatch queue and worker pool.
//!
//! ```text
//! Listener ──push──▶ DispatchQueue ──pop──▶ WorkerPool ──▶ Connection::process()
//! ```

pub mod listener;
pub mod pool;
pub mod queue;

pub use listener::Listener;
pub use pool::WorkerPool;
pub use queue::DispatchQueue;
