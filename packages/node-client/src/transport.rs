//! The RPC capability the Node client is built on.

use std::error::Error as StdError;

use async_trait::async_trait;
use pagenode_api::RpcError;
use serde_json::Value;

/// Failures of a single remote call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The call could not be delivered or its reply not read: refused or
    /// dropped connections, timeouts, broken bodies.
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn StdError + Send + Sync>),

    /// The service answered with a non-2xx HTTP status code.
    #[error("service returned status {0}")]
    BadStatus(u16),

    /// The service ran the call and reported an error.
    #[error("remote error: {0}")]
    Remote(RpcError),

    /// Params could not be encoded, or the reply could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The reply carried neither a result nor an error.
    #[error("reply has no result")]
    MissingResult,

    /// The reply answers a different call.
    #[error("reply id {got} does not match request id {expected}")]
    IdMismatch { expected: Value, got: Value },
}

impl TransportError {
    /// Wrap any delivery failure of a concrete transport.
    pub fn connection(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        TransportError::Connection(err.into())
    }
}

/// A generic remote-procedure capability.
///
/// One `call` is one request/reply exchange. Implementations decide how to
/// connect, encode and time out. Whether concurrent calls on one transport
/// are allowed is up to the implementation; [`HttpTransport`] allows them.
///
/// [`HttpTransport`]: crate::http::HttpTransport
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Invoke `method` with `params` and return the decoded result value.
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}
