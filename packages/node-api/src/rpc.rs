//! JSON-RPC 2.0 envelope shared by the Node client and service.
//!
//! Calls are posted as a single JSON object to the service's RPC endpoint:
//!
//! ```json
//! { "jsonrpc": "2.0", "method": "Node.Request", "params": { ... }, "id": 7 }
//! ```
//!
//! and answered with either a `result` or an `error`:
//!
//! ```json
//! { "jsonrpc": "2.0", "result": { "body": [60, 112, 62], "raw": false }, "id": 7 }
//! { "jsonrpc": "2.0", "error": { "code": -32004, "message": "no such node: /x" }, "id": 7 }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Protocol version carried in every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Remote method names.
pub mod methods {
    /// Process a [`Request`](crate::Request), returning a
    /// [`Response`](crate::Response).
    pub const REQUEST: &str = "Node.Request";

    /// List the content types the service supports.
    pub const GET_NODE_TYPES: &str = "Node.GetNodeTypes";
}

/// Error codes carried in [`RpcError::code`].
///
/// | `code` | Meaning |
/// |--------|---------|
/// | `-32700` | body is not valid JSON |
/// | `-32600` | body is not a valid envelope |
/// | `-32601` | unknown method |
/// | `-32602` | params do not match the method |
/// | `-32603` | internal service error |
/// | `-32003` | action not allowed on this node |
/// | `-32004` | node or site not found |
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const ACTION_NOT_ALLOWED: i32 = -32003;
    pub const NODE_NOT_FOUND: i32 = -32004;
}

/// A call envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// A reply envelope. Exactly one of `result` and `error` is set.
///
/// A `"result": null` member is a successful reply and decodes to
/// `Some(Value::Null)`; only an absent member decodes to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub id: Value,
}

fn present<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(de).map(Some)
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// The error object of a failed call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(codes::PARSE_ERROR, format!("parse error: {detail}"))
    }

    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self::new(codes::INVALID_REQUEST, format!("invalid request: {detail}"))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(codes::METHOD_NOT_FOUND, format!("method not found: {method}"))
    }

    pub fn invalid_params(detail: impl std::fmt::Display) -> Self {
        Self::new(codes::INVALID_PARAMS, format!("invalid params: {detail}"))
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope_shape() {
        let req = RpcRequest::new(methods::GET_NODE_TYPES, json!(0), json!(1));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "jsonrpc": "2.0", "method": "Node.GetNodeTypes", "params": 0, "id": 1 })
        );
    }

    #[test]
    fn success_omits_error() {
        let json = serde_json::to_string(&RpcResponse::success(json!(3), json!(["A"]))).unwrap();
        assert!(!json.contains("error"));
        let back: RpcResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.result, Some(json!(["A"])));
    }

    #[test]
    fn null_result_is_not_absent() {
        let null: RpcResponse =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "result": null, "id": 1 })).unwrap();
        assert_eq!(null.result, Some(Value::Null));

        let absent: RpcResponse =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 1 })).unwrap();
        assert_eq!(absent.result, None);

        let v = serde_json::to_value(RpcResponse::success(json!(1), Value::Null)).unwrap();
        assert_eq!(v, json!({ "jsonrpc": "2.0", "result": null, "id": 1 }));
    }

    #[test]
    fn failure_omits_result() {
        let res = RpcResponse::failure(json!(3), RpcError::method_not_found("Node.Nope"));
        let v = serde_json::to_value(&res).unwrap();
        assert!(v.get("result").is_none());
        assert_eq!(v["error"]["code"], codes::METHOD_NOT_FOUND);
        assert_eq!(v["error"]["message"], "method not found: Node.Nope");
    }

    #[test]
    fn error_display_includes_code() {
        let e = RpcError::new(codes::NODE_NOT_FOUND, "no such node: /x");
        assert_eq!(e.to_string(), "no such node: /x (code -32004)");
    }
}
