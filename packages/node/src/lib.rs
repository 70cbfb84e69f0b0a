//! Public surface for the `pagenode-node` crate.
//!
//! Exposes the router builder, the [`NodeHandler`] seam and config types so
//! that tests and embedding binaries can run an in-process Node service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod nodes;
pub mod router;

pub use config::ServiceConfig;
pub use nodes::{memory::MemoryNodes, HandlerError, NodeHandler};
pub use router::{build_router, RPC_PATH};
