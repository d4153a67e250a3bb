use std::sync::Arc;

use hostel::config::Config;
use hostel::logger::TracingLogger;
use hostel::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    server::listener::run(&cfg, Arc::new(TracingLogger), shutdown).await?;

    Ok(())
}
