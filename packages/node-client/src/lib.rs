//! Client for the page Node service.
//!
//! [`NodeClient`] turns the two Node operations into typed calls on top of
//! any [`Transport`]. The transport owns connection handling, encoding
//! and deadlines; the client only shapes calls and attributes failures to
//! the operation that caused them.
//!
//! ```rust,ignore
//! let client = NodeClient::connect(&ClientConfig::from_env())?;
//! let res = client.request(&Request::new("example", NodeInfo::new("/about"))).await?;
//! ```

pub mod client;
pub mod config;
#[cfg(feature = "http")]
pub mod http;
pub mod transport;

pub use client::{ClientError, NodeClient, Operation};
pub use config::ClientConfig;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use transport::{Transport, TransportError};
