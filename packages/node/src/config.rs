//! Service configuration, populated from environment variables.

use std::net::SocketAddr;

/// Runtime configuration for the Node service.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `PAGENODE_BIND` | `127.0.0.1:3100` | TCP socket address to listen on |
/// | `PAGENODE_SITE` | `default` | Site seeded with a root node at startup |
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,

    /// Name of the site that gets a root node on startup.
    pub site: String,
}

/// Errors reading [`ServiceConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PAGENODE_BIND must be a valid socket address (e.g. 127.0.0.1:3100), got '{0}'")]
    InvalidBind(String),
}

impl ServiceConfig {
    pub const DEFAULT_BIND: &'static str = "127.0.0.1:3100";
    pub const DEFAULT_SITE: &'static str = "default";

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind = std::env::var("PAGENODE_BIND").unwrap_or_else(|_| Self::DEFAULT_BIND.into());
        let bind_addr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        Ok(Self {
            bind_addr,
            site: std::env::var("PAGENODE_SITE").unwrap_or_else(|_| Self::DEFAULT_SITE.into()),
        })
    }
}
