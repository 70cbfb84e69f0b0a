//! The seam between the RPC layer and whatever actually serves nodes.
//!
//! The [`NodeHandler`] trait is the contract the RPC endpoint dispatches
//! into. Storage layout, node type registration and rendering all live
//! behind it; the RPC layer only decodes envelopes and encodes replies.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`MemoryNodes`] | Tests, demos, ephemeral sites |
//!
//! [`MemoryNodes`]: memory::MemoryNodes

pub mod memory;

use async_trait::async_trait;
use pagenode_api::{Request, Response};

/// Errors a [`NodeHandler`] can report back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The site or node does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The action is unknown or the session may not perform it.
    #[error("{0}")]
    NotAllowed(String),

    /// The request is malformed (e.g. a node without a path).
    #[error("{0}")]
    BadRequest(String),

    /// An unexpected failure inside the handler.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Serves node requests for any number of sites.
///
/// Implementations must be `Send + Sync + 'static` so they can be held in an
/// `Arc<dyn NodeHandler>` shared by all connections.
#[async_trait]
pub trait NodeHandler: Send + Sync + 'static {
    /// Process one request against a node.
    async fn request(&self, req: Request) -> Result<Response, HandlerError>;

    /// All node types this handler supports, in registration order.
    async fn node_types(&self) -> Result<Vec<String>, HandlerError>;
}
