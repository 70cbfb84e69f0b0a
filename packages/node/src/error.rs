//! Failures of a single RPC call, and how they map onto JSON-RPC error
//! objects.

use pagenode_api::rpc::codes;
use pagenode_api::RpcError;

use crate::nodes::HandlerError;

/// An error raised while dispatching one call envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The body is not JSON.
    #[error("parse error: {0}")]
    Parse(serde_json::Error),

    /// The body is JSON but not a call envelope.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// The params do not decode into the method's argument type.
    #[error("invalid params: {0}")]
    InvalidParams(serde_json::Error),

    /// The handler's result could not be encoded.
    #[error("encode error: {0}")]
    Encode(serde_json::Error),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl From<AppError> for RpcError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Parse(e) => RpcError::parse_error(e),
            AppError::InvalidRequest(msg) => RpcError::invalid_request(msg),
            AppError::MethodNotFound(method) => RpcError::method_not_found(&method),
            AppError::InvalidParams(e) => RpcError::invalid_params(e),
            AppError::Encode(e) => RpcError::new(codes::INTERNAL_ERROR, e.to_string()),
            AppError::Handler(h) => {
                let code = match &h {
                    HandlerError::NotFound(_) => codes::NODE_NOT_FOUND,
                    HandlerError::NotAllowed(_) => codes::ACTION_NOT_ALLOWED,
                    HandlerError::BadRequest(_) => codes::INVALID_PARAMS,
                    HandlerError::Internal(_) => codes::INTERNAL_ERROR,
                };
                RpcError::new(code, h.to_string())
            }
        }
    }
}
