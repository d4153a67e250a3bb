use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ServerError;

/// Path of an optional YAML config file.
pub const CONFIG_ENV: &str = "HOSTEL_CONFIG";
/// `<address>:<port>` override for the listening socket.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Worker thread count; unset means one per hardware thread
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Document root; each host is served from `<root>/<host>`
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self { root: default_root() }
    }
}

/// `www/` next to the directory holding the executable, i.e. `bin/../www`.
fn default_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent()?.parent().map(|dir| dir.join("www")))
        .unwrap_or_else(|| PathBuf::from("www"))
}

impl Config {
    /// Loads the file named by `HOSTEL_CONFIG` (defaults otherwise), then
    /// applies the `LISTEN` override.
    pub fn load() -> Result<Self, ServerError> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| ServerError::Config(format!("{path}: {e}")))?;
                Self::from_yaml_str(&text)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen) = std::env::var(LISTEN_ENV) {
            cfg.apply_listen(&listen)?;
        }

        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ServerError> {
        let cfg: Self = serde_yaml::from_str(text)
            .map_err(|e| ServerError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Sets address and port from `<address>:<port>`.
    pub fn apply_listen(&mut self, listen: &str) -> Result<(), ServerError> {
        let (address, port) = listen
            .rsplit_once(':')
            .ok_or_else(|| ServerError::Config(format!("{LISTEN_ENV} must be <address>:<port>, got {listen:?}")))?;
        let port = port
            .parse()
            .map_err(|_| ServerError::Config(format!("invalid port in {LISTEN_ENV}: {port:?}")))?;

        self.server.address = address.trim_matches(['[', ']']).to_string();
        self.server.port = port;
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.address, self.server.port)
    }

    fn validate(&self) -> Result<(), ServerError> {
        if self.server.workers == Some(0) {
            return Err(ServerError::Config("server.workers must be at least 1".to_string()));
        }
        Ok(())
    }
}
