//! JSON-RPC over HTTP transport.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pagenode_api::{RpcRequest, RpcResponse};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::transport::{Transport, TransportError};

/// Posts one JSON-RPC envelope per call to a fixed endpoint.
///
/// Holds a cloneable [`reqwest::Client`] (which pools connections), so a
/// single transport can serve many concurrent calls. Request ids come from
/// an atomic counter.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::connection(err)
    }
}

impl HttpTransport {
    /// Create a transport for `endpoint` using a pre-configured client.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Build a client with the configured timeout and create a transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::new(client, config.url.clone()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, endpoint = %self.endpoint, "rpc call");

        let envelope = RpcRequest::new(method, params, Value::from(id));
        let response = self.client.post(&self.endpoint).json(&envelope).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(method, id, status = status.as_u16(), "rpc call rejected");
            return Err(TransportError::BadStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let reply: RpcResponse = serde_json::from_slice(&bytes)?;

        // Errors for envelopes the service could not read carry a null id.
        let expected = Value::from(id);
        if reply.id != expected && !(reply.id.is_null() && reply.error.is_some()) {
            warn!(method, id, got = %reply.id, "rpc reply id mismatch");
            return Err(TransportError::IdMismatch {
                expected,
                got: reply.id,
            });
        }

        match (reply.result, reply.error) {
            (_, Some(error)) => {
                warn!(method, id, code = error.code, "rpc call failed: {}", error.message);
                Err(TransportError::Remote(error))
            }
            (Some(result), None) => Ok(result),
            (None, None) => Err(TransportError::MissingResult),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::json;

    /// Serve `reply` for every POST to `/rpc` and return the endpoint URL.
    async fn canned(reply: Value) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().route("/rpc", post(move || async move { Json(reply) }));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/rpc")
    }

    fn transport(url: String) -> HttpTransport {
        HttpTransport::from_config(&ClientConfig {
            url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn from_config_uses_url() {
        let transport = transport("http://127.0.0.1:9/rpc".into());
        assert_eq!(transport.endpoint(), "http://127.0.0.1:9/rpc");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_connection_error() {
        let transport = HttpTransport::from_config(&ClientConfig {
            url: "http://127.0.0.1:9/rpc".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let err = transport.call("Node.GetNodeTypes", Value::from(0)).await.unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn null_result_is_success() {
        let url = canned(json!({ "jsonrpc": "2.0", "result": null, "id": 1 })).await;
        let result = transport(url).call("Node.GetNodeTypes", json!(0)).await.unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn absent_result_is_missing() {
        let url = canned(json!({ "jsonrpc": "2.0", "id": 1 })).await;
        let err = transport(url).call("Node.GetNodeTypes", json!(0)).await.unwrap_err();
        assert!(matches!(err, TransportError::MissingResult));
    }

    #[tokio::test]
    async fn reply_for_another_call_is_rejected() {
        let url = canned(json!({ "jsonrpc": "2.0", "result": ["Document"], "id": 42 })).await;
        let err = transport(url).call("Node.GetNodeTypes", json!(0)).await.unwrap_err();
        match err {
            TransportError::IdMismatch { expected, got } => {
                assert_eq!(expected, json!(1));
                assert_eq!(got, json!(42));
            }
            other => panic!("expected id mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_with_null_id_is_remote() {
        let url = canned(json!({
            "jsonrpc": "2.0",
            "error": { "code": -32700, "message": "parse error: eof" },
            "id": null
        }))
        .await;
        let err = transport(url).call("Node.GetNodeTypes", json!(0)).await.unwrap_err();
        assert!(matches!(err, TransportError::Remote(ref e) if e.code == -32700));
    }

    #[tokio::test]
    async fn ids_advance_per_call() {
        let url = canned(json!({ "jsonrpc": "2.0", "result": [], "id": 1 })).await;
        let transport = transport(url);
        transport.call("Node.GetNodeTypes", json!(0)).await.unwrap();
        // The canned reply still says 1; the second call is id 2.
        assert!(matches!(
            transport.call("Node.GetNodeTypes", json!(0)).await,
            Err(TransportError::IdMismatch { .. })
        ));
    }
}
