// ABOUTME: Environment-derived configuration for the Drafter server binary
// ABOUTME: Resolves port, CORS origin, database path, and chat context bound

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid chat context limit: {0}")]
    InvalidChatContext(String),
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    /// None means the default location under ~/.drafter
    pub database_path: Option<PathBuf>,
    pub chat_context_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str =
            env::var(drafter_config::DRAFTER_PORT).unwrap_or_else(|_| "4120".to_string());

        let port = port_str.parse::<u16>()?;

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin = env::var(drafter_config::DRAFTER_CORS_ORIGIN)
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let database_path = env::var(drafter_config::DRAFTER_DB_PATH)
            .ok()
            .map(PathBuf::from);

        let chat_context_limit = match env::var(drafter_config::DRAFTER_CHAT_CONTEXT) {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidChatContext(raw.clone()))?,
            Err(_) => drafter_api::state::DEFAULT_CHAT_CONTEXT,
        };

        Ok(Config {
            port,
            cors_origin,
            database_path,
            chat_context_limit,
        })
    }
}
