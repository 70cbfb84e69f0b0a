//! Typed façade over a [`Transport`].

use std::fmt;
use std::sync::Arc;

use pagenode_api::rpc::methods;
use pagenode_api::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

#[cfg(feature = "http")]
use crate::config::ClientConfig;
#[cfg(feature = "http")]
use crate::http::HttpTransport;
use crate::transport::{Transport, TransportError};

/// The Node operation a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Request,
    GetNodeTypes,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Request => "Request",
            Operation::GetNodeTypes => "GetNodeTypes",
        })
    }
}

/// Errors returned by [`NodeClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The remote call for `op` did not complete.
    #[error("node: RPC error for {op}: {source}")]
    Rpc {
        op: Operation,
        #[source]
        source: TransportError,
    },
}

impl ClientError {
    pub fn operation(&self) -> Operation {
        match self {
            ClientError::Rpc { op, .. } => *op,
        }
    }
}

/// The RPC connection to the Node service.
///
/// Holds nothing but the shared transport handle, so clones are cheap and
/// calls from many tasks go straight to the transport.
#[derive(Clone)]
pub struct NodeClient {
    transport: Arc<dyn Transport>,
}

impl NodeClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// A client speaking JSON-RPC over HTTP to `config.url`.
    #[cfg(feature = "http")]
    pub fn connect(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::from_config(config)?)))
    }

    /// Have the service process `req`.
    ///
    /// No local validation is done; node existence and action legality are
    /// the service's business.
    pub async fn request(&self, req: &Request) -> Result<Response, ClientError> {
        self.call(Operation::Request, methods::REQUEST, req).await
    }

    /// All node types the service supports, exactly as the service lists them.
    pub async fn get_node_types(&self) -> Result<Vec<String>, ClientError> {
        self.call(Operation::GetNodeTypes, methods::GET_NODE_TYPES, &0)
            .await
    }

    async fn call<P, R>(&self, op: Operation, method: &str, params: &P) -> Result<R, ClientError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let wrap = move |source: TransportError| ClientError::Rpc { op, source };
        let params = serde_json::to_value(params).map_err(|e| wrap(e.into()))?;
        let result = self.transport.call(method, params).await.map_err(wrap)?;
        serde_json::from_value(result).map_err(|e| wrap(e.into()))
    }
}
