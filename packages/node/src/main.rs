//! `pagenode-node` — reference Node service.
//!
//! Serves the JSON-RPC surface on `POST /rpc`, backed by an in-memory node
//! handler. On startup the configured site gets a root document so the
//! service can be tried immediately:
//!
//! ```sh
//! pagenode-node
//! PAGENODE_BIND=0.0.0.0:8080 PAGENODE_SITE=example pagenode-node
//! ```

use std::process;
use std::sync::Arc;

use pagenode_api::NodeInfo;
use pagenode_node::nodes::memory::DOCUMENT;
use pagenode_node::{build_router, MemoryNodes, ServiceConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagenode_node=info,tower_http=debug".into()),
        )
        .init();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let nodes = MemoryNodes::with_default_types();
    let root = NodeInfo {
        node_type: DOCUMENT.into(),
        title: "Home".into(),
        ..NodeInfo::new("/")
    };
    if let Err(e) = nodes.put_node(&config.site, root, "<p>It works.</p>") {
        eprintln!("error: failed to seed site '{}': {e}", config.site);
        process::exit(1);
    }
    tracing::info!("nodes: in-memory, site '{}' seeded with /", config.site);

    let app = build_router(Arc::new(nodes));

    tracing::info!("listening on {}", config.bind_addr);
    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("error: failed to bind {}: {e}", config.bind_addr);
            process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("error: server error: {e}");
        process::exit(1);
    }
}
