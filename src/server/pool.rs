use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::ServerError;
use crate::http::connection::{Connection, Transport};
use crate::server::queue::DispatchQueue;

/// One worker per available hardware thread, at least one.
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Fixed set of long-lived threads draining a [`DispatchQueue`].
///
/// Each worker pops one connection, processes it outside the queue lock and
/// goes back for the next, until the queue is closed and empty.
pub struct WorkerPool<S = std::net::TcpStream> {
    queue: Arc<DispatchQueue<Connection<S>>>,
    workers: Vec<JoinHandle<()>>,
}

impl<S> WorkerPool<S>
where
    S: Transport + Send + 'static,
{
    pub fn start(size: usize, queue: Arc<DispatchQueue<Connection<S>>>) -> Result<Self, ServerError> {
        let mut pool = Self {
            queue,
            workers: Vec::with_capacity(size),
        };

        for id in 0..size {
            let queue = Arc::clone(&pool.queue);
            let spawned = thread::Builder::new()
                .name(format!("worker-{id}"))
                .spawn(move || worker_loop(id, &queue));

            match spawned {
                Ok(handle) => pool.workers.push(handle),
                Err(e) => {
                    pool.shutdown();
                    return Err(ServerError::Spawn(e));
                }
            }
        }

        tracing::info!(workers = size, "Worker pool started");
        Ok(pool)
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Closes the queue, lets the workers drain it, and joins them.
    pub fn shutdown(self) {
        self.queue.close();

        for handle in self.workers {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                tracing::error!(worker = %name, "Worker thread panicked");
            }
        }

        tracing::info!("Worker pool stopped");
    }
}

fn worker_loop<S: Transport>(id: usize, queue: &DispatchQueue<Connection<S>>) {
    tracing::debug!(worker = id, "Worker started");

    while let Some(connection) = queue.pop() {
        connection.process();
    }

    tracing::debug!(worker = id, "Worker exiting");
}
