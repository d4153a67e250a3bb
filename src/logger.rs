/// A plain-text log sink handed to the components that report progress.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards every message to `tracing` at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
