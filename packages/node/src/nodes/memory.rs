//! In-memory node handler.
//!
//! All nodes are held in RAM behind a [`RwLock`] and are lost when the
//! process exits. Each site is a [`BTreeMap`] keyed by path, so the nodes of
//! a site iterate in path order.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagenode_api::{NodeInfo, Request, Response};
use tracing::debug;

use super::{HandlerError, NodeHandler};

/// Rendered into the page layout.
pub const DOCUMENT: &str = "Document";

/// Served raw, content as stored.
pub const FILE: &str = "File";

/// Action used to change a node's title and content.
pub const EDIT_ACTION: &str = "edit";

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

struct StoredNode {
    info: NodeInfo,
    content: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    /// Site name → path → node.
    sites: HashMap<String, BTreeMap<String, StoredNode>>,
}

// ---------------------------------------------------------------------------
// MemoryNodes
// ---------------------------------------------------------------------------

/// Thread-safe, in-memory implementation of [`NodeHandler`].
pub struct MemoryNodes {
    types: Vec<String>,
    inner: RwLock<Inner>,
}

impl MemoryNodes {
    /// A handler supporting exactly `types`, in this order.
    pub fn new(types: Vec<String>) -> Self {
        Self {
            types,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// A handler supporting [`DOCUMENT`] and [`FILE`].
    pub fn with_default_types() -> Self {
        Self::new(vec![DOCUMENT.into(), FILE.into()])
    }

    /// Create or replace a node, creating the site on first use.
    pub fn put_node(
        &self,
        site: &str,
        mut info: NodeInfo,
        content: impl Into<Vec<u8>>,
    ) -> Result<(), HandlerError> {
        if !info.is_persisted() {
            return Err(HandlerError::BadRequest("node path must not be empty".into()));
        }
        if !self.types.contains(&info.node_type) {
            return Err(HandlerError::BadRequest(format!(
                "unknown node type: {}",
                info.node_type
            )));
        }
        info.path = normalize(&info.path).to_string();
        let mut inner = self.write()?;
        inner.sites.entry(site.to_string()).or_default().insert(
            info.path.clone(),
            StoredNode {
                info,
                content: content.into(),
            },
        );
        Ok(())
    }

    pub fn get_node(&self, site: &str, path: &str) -> Result<Option<NodeInfo>, HandlerError> {
        let inner = self.read()?;
        Ok(inner
            .sites
            .get(site)
            .and_then(|nodes| nodes.get(normalize(path)))
            .map(|n| n.info.clone()))
    }

    /// Direct children of `path` that are not hidden, in sibling order.
    pub fn children(&self, site: &str, path: &str) -> Result<Vec<NodeInfo>, HandlerError> {
        let inner = self.read()?;
        let Some(nodes) = inner.sites.get(site) else {
            return Ok(vec![]);
        };
        let parent = normalize(path);
        let mut children: Vec<NodeInfo> = nodes
            .values()
            .filter(|n| !n.info.hide && parent_path(&n.info.path) == Some(parent))
            .map(|n| n.info.clone())
            .collect();
        children.sort_by(NodeInfo::sibling_order);
        Ok(children)
    }

    // --- Locking -------------------------------------------------------------

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, HandlerError> {
        self.inner
            .read()
            .map_err(|_| HandlerError::Internal("node store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, HandlerError> {
        self.inner
            .write()
            .map_err(|_| HandlerError::Internal("node store lock poisoned".into()))
    }

    // --- Actions -------------------------------------------------------------

    fn lookup(&self, site: &str, path: &str) -> Result<(NodeInfo, Vec<u8>), HandlerError> {
        let inner = self.read()?;
        let nodes = inner
            .sites
            .get(site)
            .ok_or_else(|| HandlerError::NotFound(format!("no such site: {site}")))?;
        let node = nodes
            .get(normalize(path))
            .ok_or_else(|| HandlerError::NotFound(format!("no such node: {path}")))?;
        Ok((node.info.clone(), node.content.clone()))
    }

    fn view(&self, req: &Request, info: &NodeInfo, content: &[u8]) -> Result<Response, HandlerError> {
        let mut res = Response::new();
        if info.node_type == FILE {
            res.raw = true;
            res.write(content);
            return Ok(res);
        }

        let id = info
            .path_to_id()
            .map_err(|e| HandlerError::Internal(e.to_string()))?;
        let mut html = format!(
            "<div id=\"{id}\" class=\"node\">\n<h1>{}</h1>\n",
            escape(&info.title)
        );
        html.push_str(&String::from_utf8_lossy(content));
        let children = self.children(&req.site, &info.path)?;
        if !children.is_empty() {
            html.push_str("\n<ul class=\"children\">");
            for child in &children {
                let label = if child.short_title.is_empty() {
                    &child.title
                } else {
                    &child.short_title
                };
                html.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    escape(&child.path),
                    escape(label)
                ));
            }
            html.push_str("</ul>");
        }
        html.push_str("\n</div>");
        res.write(html.as_bytes());
        Ok(res)
    }

    fn edit(&self, req: &Request, info: NodeInfo, content: &[u8]) -> Result<Response, HandlerError> {
        if req.session.is_anonymous() {
            return Err(HandlerError::NotAllowed(format!(
                "login required to edit {}",
                info.path
            )));
        }

        if !req.is_side_effecting() {
            let mut res = Response::new();
            let form = format!(
                "<form method=\"post\">\n\
                 <input name=\"title\" value=\"{}\">\n\
                 <input name=\"short_title\" value=\"{}\">\n\
                 <textarea name=\"body\">{}</textarea>\n\
                 <button type=\"submit\">Save</button>\n\
                 </form>",
                escape(&info.title),
                escape(&info.short_title),
                escape(&String::from_utf8_lossy(content)),
            );
            res.write(form.as_bytes());
            return Ok(res);
        }

        let form = &req.form_data;
        let title = form.get("title").unwrap_or_default().trim();
        if title.is_empty() {
            return Err(HandlerError::BadRequest("title must not be empty".into()));
        }
        let mut updated = info;
        updated.title = title.to_string();
        if let Some(short_title) = form.get("short_title") {
            updated.short_title = short_title.trim().to_string();
        }
        let new_content = form.get("body").map(|b| b.as_bytes().to_vec());

        {
            let mut inner = self.write()?;
            let stored = inner
                .sites
                .get_mut(&req.site)
                .and_then(|nodes| nodes.get_mut(&updated.path))
                .ok_or_else(|| HandlerError::NotFound(format!("no such node: {}", updated.path)))?;
            stored.info = updated.clone();
            if let Some(c) = new_content {
                stored.content = c;
            }
        }
        debug!(site = %req.site, path = %updated.path, "node edited");

        let mut res = Response::redirect_to(updated.path.clone());
        res.node = Some(updated);
        Ok(res)
    }
}

impl Default for MemoryNodes {
    fn default() -> Self {
        Self::with_default_types()
    }
}

// ---------------------------------------------------------------------------
// NodeHandler impl
// ---------------------------------------------------------------------------

#[async_trait]
impl NodeHandler for MemoryNodes {
    async fn request(&self, req: Request) -> Result<Response, HandlerError> {
        if !req.node.is_persisted() {
            return Err(HandlerError::BadRequest("node path must not be empty".into()));
        }
        let (info, content) = self.lookup(&req.site, &req.node.path)?;
        match req.action.as_str() {
            "" | "view" => self.view(&req, &info, &content),
            EDIT_ACTION => self.edit(&req, info, &content),
            other => Err(HandlerError::NotAllowed(format!(
                "unknown action '{other}' for {}",
                info.path
            ))),
        }
    }

    async fn node_types(&self) -> Result<Vec<String>, HandlerError> {
        Ok(self.types.clone())
    }
}

// ---------------------------------------------------------------------------
// Path and markup helpers
// ---------------------------------------------------------------------------

/// Strip trailing slashes, keeping the root as `/`.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// The parent of a normalized path; the root and relative single segments
/// have none.
fn parent_path(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rsplit_once('/') {
        Some(("", _)) => Some("/"),
        Some((parent, _)) => Some(parent),
        None => None,
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
