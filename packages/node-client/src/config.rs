//! Client configuration, populated from environment variables.

/// Where and how to reach the Node service.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `PAGENODE_URL` | `http://127.0.0.1:3100/rpc` | RPC endpoint of the Node service |
/// | `PAGENODE_TIMEOUT_SECS` | `30` | Per-call timeout applied by the HTTP transport |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the service's RPC endpoint.
    pub url: String,

    pub timeout_secs: u64,
}

impl ClientConfig {
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:3100/rpc";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("PAGENODE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);

        Self {
            url: std::env::var("PAGENODE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.into()),
            timeout_secs,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT_URL.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}
