use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ServerError;
use crate::http::connection::Connection;
use crate::http::resolver::FileResolver;
use crate::logger::Logger;
use crate::server::pool::{default_worker_count, WorkerPool};
use crate::server::queue::DispatchQueue;

const LISTEN_BACKLOG: u32 = 1024;

/// Resolves `address:port`, then creates, binds and listens on a socket.
///
/// Each step fails with its own [`ServerError`] variant carrying the OS
/// error.
pub async fn create_listener(address: &str, port: u16) -> Result<TcpListener, ServerError> {
    let display = format!("{address}:{port}");

    let addr = tokio::net::lookup_host((address, port))
        .await
        .map_err(|source| ServerError::Resolve {
            addr: display.clone(),
            source,
        })?
        .next()
        .ok_or_else(|| ServerError::Resolve {
            addr: display.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
        })?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(ServerError::Socket)?;

    socket.bind(addr).map_err(|source| ServerError::Bind {
        addr: display.clone(),
        source,
    })?;

    socket
        .listen(LISTEN_BACKLOG)
        .map_err(|source| ServerError::Listen {
            addr: display,
            source,
        })
}

/// The bound listening socket plus everything needed to serve from it.
pub struct Listener {
    listener: TcpListener,
    local_addr: SocketAddr,
    resolver: Arc<FileResolver>,
    workers: usize,
    logger: Arc<dyn Logger>,
}

impl Listener {
    pub async fn bind(cfg: &Config, logger: Arc<dyn Logger>) -> Result<Self, ServerError> {
        let listener = create_listener(&cfg.server.address, cfg.server.port).await?;
        let local_addr = listener.local_addr().map_err(ServerError::Socket)?;

        let root = &cfg.static_files.root;
        if !root.is_dir() {
            warn!(root = %root.display(), "Document root is not a directory");
        }

        info!("Listening on {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            resolver: Arc::new(FileResolver::new(root.clone())),
            workers: cfg.server.workers.unwrap_or_else(default_worker_count),
            logger,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Starts the worker pool and accepts until `shutdown` completes.
    ///
    /// Every accepted socket becomes a [`Connection`] on the dispatch queue.
    /// On shutdown the listener is closed, queued connections are drained and
    /// all workers are joined before this returns.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let queue = Arc::new(DispatchQueue::new());
        let pool = WorkerPool::start(self.workers, Arc::clone(&queue))?;

        tokio::pin!(shutdown);

        loop {
            self.logger.log("Waiting for connection");

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }

                accepted = self.listener.accept() => match accepted {
                    Ok((socket, peer)) => {
                        self.logger.log("New connection");

                        match into_blocking(socket) {
                            Ok(stream) => {
                                queue.push(Connection::new(stream, Arc::clone(&self.resolver)));
                            }
                            Err(e) => warn!(%peer, error = %e, "Failed to hand off connection"),
                        }
                    }
                    Err(e) => debug!(error = %e, "Accept failed"),
                },
            }
        }

        drop(self.listener);

        if let Err(e) = tokio::task::spawn_blocking(move || pool.shutdown()).await {
            tracing::error!(error = %e, "Worker pool shutdown failed");
        }

        Ok(())
    }
}

/// Binds per `cfg` and serves until `shutdown` completes.
pub async fn run<F>(cfg: &Config, logger: Arc<dyn Logger>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    Listener::bind(cfg, logger).await?.run(shutdown).await
}

// Workers do plain blocking I/O on the std stream.
fn into_blocking(socket: TcpStream) -> io::Result<std::net::TcpStream> {
    let stream = socket.into_std()?;
    stream.set_nonblocking(false)?;
    Ok(stream)
}
