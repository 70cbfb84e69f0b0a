//! HTTP handlers for the Node service.
//!
//! The service has a single endpoint, `POST /rpc`, which accepts one
//! JSON-RPC call envelope per request and dispatches it into the
//! [`NodeHandler`]. See [`rpc`].

pub mod rpc;

use std::sync::Arc;

use crate::nodes::NodeHandler;

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub nodes: Arc<dyn NodeHandler>,
}
