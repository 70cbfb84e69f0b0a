//! Request and response types for the page Node service.
//!
//! This crate encodes the contract between a content-rendering front end
//! and a Node service that stores and serves hierarchical pages for one or
//! more sites. Both the client and the service depend on it, so the types
//! here are the wire format.
//!
//! # RPC methods
//!
//! | Method | Argument | Result |
//! |--------|----------|--------|
//! | [`rpc::methods::REQUEST`] | [`Request`] | [`Response`] |
//! | [`rpc::methods::GET_NODE_TYPES`] | `0` (sentinel) | `Vec<String>` |
//!
//! # Rendering a response
//!
//! ```rust,ignore
//! match response.disposition() {
//!     Disposition::Redirect(target) => see_other(target),
//!     Disposition::Raw(body) => send_sniffed(body),
//!     Disposition::Embed(body) => render_layout(response.node_or(&request.node), body),
//! }
//! ```

pub mod node;
pub mod request;
pub mod response;
pub mod rpc;
pub mod session;
pub mod values;

pub use node::{IdError, NodeInfo};
pub use request::Request;
pub use response::{Disposition, Response, SEE_OTHER};
pub use rpc::{RpcError, RpcRequest, RpcResponse};
pub use session::UserSession;
pub use values::{Values, ValuesError};
