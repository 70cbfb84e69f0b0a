//! Assembles the Axum [`Router`] for the Node service.

use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{rpc, AppState},
    nodes::NodeHandler,
};

/// Path of the JSON-RPC endpoint.
pub const RPC_PATH: &str = "/rpc";

/// Build the complete application router with shared state.
pub fn build_router(nodes: Arc<dyn NodeHandler>) -> Router {
    let state = AppState { nodes };

    Router::new()
        .route(RPC_PATH, post(rpc::dispatch))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
