//! JSON-RPC endpoint — `POST /rpc`.
//!
//! Every well-formed HTTP request gets a `200 OK` with a reply envelope;
//! failures are reported in the envelope's `error` object, never through
//! the HTTP status.

use axum::{body::Bytes, extract::State, Json};
use pagenode_api::rpc::{methods, JSONRPC_VERSION};
use pagenode_api::{Request, RpcRequest, RpcResponse};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::AppState;
use crate::error::AppError;

/// `POST /rpc`
pub async fn dispatch(State(state): State<AppState>, body: Bytes) -> Json<RpcResponse> {
    let envelope = match decode(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("rejected rpc envelope: {e}");
            return Json(RpcResponse::failure(Value::Null, e.into()));
        }
    };

    let RpcRequest { method, params, id, .. } = envelope;
    debug!(%method, %id, "rpc call");
    match call(&state, &method, params).await {
        Ok(result) => Json(RpcResponse::success(id, result)),
        Err(e) => {
            warn!(%method, %id, "rpc call failed: {e}");
            Json(RpcResponse::failure(id, e.into()))
        }
    }
}

fn decode(body: &[u8]) -> Result<RpcRequest, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(AppError::Parse)?;
    let envelope: RpcRequest = serde_json::from_value(value)
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    if envelope.jsonrpc != JSONRPC_VERSION {
        return Err(AppError::InvalidRequest(format!(
            "unsupported jsonrpc version '{}'",
            envelope.jsonrpc
        )));
    }
    Ok(envelope)
}

async fn call(state: &AppState, method: &str, params: Value) -> Result<Value, AppError> {
    match method {
        methods::REQUEST => {
            let req: Request = serde_json::from_value(params).map_err(AppError::InvalidParams)?;
            encode(&state.nodes.request(req).await?)
        }
        // The argument is a placeholder; any value is accepted.
        methods::GET_NODE_TYPES => encode(&state.nodes.node_types().await?),
        other => Err(AppError::MethodNotFound(other.to_string())),
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(AppError::Encode)
}
