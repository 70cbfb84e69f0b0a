//! Node metadata and the path-derived node identifier.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every identifier produced by [`NodeInfo::path_to_id`].
pub const ID_PREFIX: &str = "node-";

/// Replacement for each `/` in a path when deriving an identifier.
pub const ID_SEPARATOR: &str = "__";

/// Errors raised when deriving a node identifier.
///
/// These signal a programming mistake in the caller, not a condition worth
/// retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("can't calculate ID of node with unset path")]
    UnsetPath,
}

/// Describes one content node.
///
/// # Example
///
/// ```json
/// {
///   "path": "/about/team",
///   "type": "Document",
///   "title": "Our Team",
///   "short_title": "Team",
///   "description": "Who we are.",
///   "order": 2,
///   "hide": false
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NodeInfo {
    /// Slash-separated location of the node, unique within a site.
    ///
    /// Empty only for nodes that have not been persisted yet.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// Content type of the node.
    ///
    /// An open set: new types are added by the service without touching
    /// this crate.
    #[serde(rename = "type")]
    pub node_type: String,

    pub title: String,

    /// Title used where space is short, e.g. in navigations.
    pub short_title: String,

    pub description: String,

    /// Order of the node compared to its siblings. Lower sorts first.
    pub order: i32,

    /// Don't show the node in navigations if `true`. The node stays
    /// reachable by its path.
    pub hide: bool,
}

impl NodeInfo {
    /// Construct a node with only its path set.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Returns an ID for this node based on its path.
    ///
    /// The ID is the path with every `/` replaced by two underscores,
    /// prefixed with `node-`. A node at `/foo/bar` gets `node-__foo__bar`.
    ///
    /// Paths that already contain `__` can map to the same ID as a path with
    /// a `/` in that position (`/a__b` and `/a/b` both give `node-__a__b`).
    /// Existing templates and stylesheets address nodes by these IDs, so the
    /// scheme is kept as is.
    ///
    /// Returns [`IdError::UnsetPath`] if the path is empty.
    pub fn path_to_id(&self) -> Result<String, IdError> {
        if self.path.is_empty() {
            return Err(IdError::UnsetPath);
        }
        Ok(format!(
            "{ID_PREFIX}{}",
            self.path.replace('/', ID_SEPARATOR)
        ))
    }

    /// `true` once the node has a path.
    pub fn is_persisted(&self) -> bool {
        !self.path.is_empty()
    }

    /// The last segment of the path, ignoring a trailing slash.
    ///
    /// The root node (`/`) and unset paths have an empty name.
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or_default()
    }

    /// Ordering for siblings: by `order`, then by `path` so ties are stable.
    pub fn sibling_order(a: &NodeInfo, b: &NodeInfo) -> Ordering {
        a.order.cmp(&b.order).then_with(|| a.path.cmp(&b.path))
    }
}
