//! End-to-end tests: the Node client talking JSON-RPC over real HTTP to an
//! in-process Node service.
//!
//! Each test binds an ephemeral port, serves the router in a background
//! task and drives it through `NodeClient` with its HTTP transport.

use std::sync::Arc;

use pagenode_api::rpc::codes;
use pagenode_api::{Disposition, NodeInfo, Request, UserSession, Values};
use pagenode_client::{ClientConfig, ClientError, NodeClient, Operation, TransportError};
use pagenode_node::nodes::memory::{DOCUMENT, EDIT_ACTION, FILE};
use pagenode_node::{build_router, MemoryNodes, RPC_PATH};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Start an ephemeral service and return a client pointed at it, plus the
/// handler so tests can inspect stored nodes.
async fn spawn_service() -> (NodeClient, Arc<MemoryNodes>) {
    let nodes = Arc::new(MemoryNodes::with_default_types());
    let doc = |path: &str, title: &str| NodeInfo {
        node_type: DOCUMENT.into(),
        title: title.into(),
        ..NodeInfo::new(path)
    };
    nodes.put_node("example", doc("/", "Home"), "<p>Welcome</p>").unwrap();
    nodes.put_node("example", doc("/about", "About"), "<p>About</p>").unwrap();
    nodes
        .put_node(
            "example",
            NodeInfo {
                node_type: FILE.into(),
                ..NodeInfo::new("/robots.txt")
            },
            "User-agent: *\n",
        )
        .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let router = build_router(Arc::clone(&nodes) as Arc<dyn pagenode_node::NodeHandler>);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("node service error");
    });

    let config = ClientConfig {
        url: format!("http://{addr}{RPC_PATH}"),
        timeout_secs: 5,
    };
    (NodeClient::connect(&config).unwrap(), nodes)
}

fn admin() -> UserSession {
    UserSession::new(json!({ "login": "admin" }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_node_types_over_http() {
    let (client, _) = spawn_service().await;
    assert_eq!(client.get_node_types().await.unwrap(), ["Document", "File"]);
}

#[tokio::test]
async fn view_is_embedded() {
    let (client, _) = spawn_service().await;
    let req = Request::new("example", NodeInfo::new("/about"));
    let res = client.request(&req).await.unwrap();

    match res.disposition() {
        Disposition::Embed(body) => {
            let html = std::str::from_utf8(body).unwrap();
            assert!(html.contains("id=\"node-__about\""));
            assert!(html.contains("<p>About</p>"));
        }
        other => panic!("expected embedded body, got {other:?}"),
    }
    assert_eq!(res.node_or(&req.node).path, "/about");
}

#[tokio::test]
async fn file_is_raw() {
    let (client, _) = spawn_service().await;
    let res = client
        .request(&Request::new("example", NodeInfo::new("/robots.txt")))
        .await
        .unwrap();
    assert_eq!(res.disposition(), Disposition::Raw(b"User-agent: *\n"));
}

#[tokio::test]
async fn edit_redirects_and_returns_updated_node() {
    let (client, nodes) = spawn_service().await;
    let form = Values::parse("title=About+us&body=%3Cp%3ENew%3C%2Fp%3E").unwrap();
    let req = Request::new("example", NodeInfo::new("/about"))
        .with_method("POST")
        .with_action(EDIT_ACTION)
        .with_session(admin())
        .with_form_data(form);

    let res = client.request(&req).await.unwrap();
    assert_eq!(res.disposition(), Disposition::Redirect("/about"));
    assert_eq!(res.node_or(&req.node).title, "About us");
    assert_eq!(
        nodes.get_node("example", "/about").unwrap().unwrap().title,
        "About us"
    );
}

#[tokio::test]
async fn service_error_is_attributed_to_request() {
    let (client, _) = spawn_service().await;
    let err = client
        .request(&Request::new("example", NodeInfo::new("/missing")))
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Operation::Request);
    assert!(err.to_string().starts_with("node: RPC error for Request: "));
    match err {
        ClientError::Rpc {
            source: TransportError::Remote(rpc),
            ..
        } => assert_eq!(rpc.code, codes::NODE_NOT_FOUND),
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_fails_both_operations() {
    // Bind and drop to get a port nothing listens on.
    let addr = {
        let l = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let client = NodeClient::connect(&ClientConfig {
        url: format!("http://{addr}{RPC_PATH}"),
        timeout_secs: 2,
    })
    .unwrap();

    let err = client
        .request(&Request::new("example", NodeInfo::new("/")))
        .await
        .unwrap_err();
    assert!(err
        .to_string()
        .starts_with("node: RPC error for Request: connection error"));
    assert!(matches!(
        err,
        ClientError::Rpc {
            source: TransportError::Connection(_),
            ..
        }
    ));

    let err = client.get_node_types().await.unwrap_err();
    assert_eq!(err.operation(), Operation::GetNodeTypes);
}

#[tokio::test]
async fn wrong_path_is_bad_status() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = build_router(Arc::new(MemoryNodes::default()));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = NodeClient::connect(&ClientConfig {
        url: format!("http://{addr}/not-rpc"),
        timeout_secs: 5,
    })
    .unwrap();
    let err = client.get_node_types().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Rpc {
            op: Operation::GetNodeTypes,
            source: TransportError::BadStatus(404),
        }
    ));
}
