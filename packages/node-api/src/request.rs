//! A request to be processed by the Node service.

use serde::{Deserialize, Serialize};

use crate::{NodeInfo, UserSession, Values};

/// One operation against a node, built per incoming user request.
///
/// `method` is the transport method of the user's request (`GET`, `POST`,
/// ...), which the service uses to tell reads from writes. `action` selects
/// what to do with the node (e.g. `"edit"`); empty means the default view.
///
/// # Example
///
/// ```json
/// {
///   "site": "example",
///   "node": { "path": "/about", "type": "Document" },
///   "query": { "lang": ["en"] },
///   "method": "POST",
///   "session": { "login": "admin" },
///   "action": "edit",
///   "form_data": { "title": ["About us"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Name of the site the node belongs to.
    pub site: String,

    /// The requested node. At minimum `path` is set by the caller.
    pub node: NodeInfo,

    /// Query values of the request URL.
    pub query: Values,

    pub method: String,

    pub session: UserSession,

    pub action: String,

    /// Submitted form fields.
    pub form_data: Values,
}

impl Request {
    /// A `GET` request for the default action on `node`.
    pub fn new(site: impl Into<String>, node: NodeInfo) -> Self {
        Self {
            site: site.into(),
            node,
            method: "GET".into(),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_query(mut self, query: Values) -> Self {
        self.query = query;
        self
    }

    pub fn with_form_data(mut self, form_data: Values) -> Self {
        self.form_data = form_data;
        self
    }

    pub fn with_session(mut self, session: UserSession) -> Self {
        self.session = session;
        self
    }

    /// `true` unless the method is `GET` or `HEAD` (case-insensitive).
    pub fn is_side_effecting(&self) -> bool {
        !(self.method.eq_ignore_ascii_case("GET") || self.method.eq_ignore_ascii_case("HEAD"))
    }
}
