//! The Node service's answer to a [`Request`](crate::Request).

use std::io;

use serde::{Deserialize, Serialize};

use crate::NodeInfo;

/// HTTP status used for [`Response::redirect`] targets ("See Other").
pub const SEE_OTHER: u16 = 303;

/// Response to a node request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// HTML content to be embedded in the surrounding page layout.
    ///
    /// Grows through [`Response::write`]; writes never overwrite earlier
    /// content.
    pub body: Vec<u8>,

    /// If `true`, `body` is the complete HTTP response and must not be
    /// embedded. The caller detects the content type.
    pub raw: bool,

    /// If non-empty, redirect to this target with [`SEE_OTHER`] instead of
    /// rendering `body`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect: String,

    /// The node as sent in the request, possibly with some fields updated
    /// (e.g. a modified title). `None` means the request's node is still
    /// current.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeInfo>,
}

/// How the caller has to deliver a [`Response`].
#[derive(Debug, PartialEq, Eq)]
pub enum Disposition<'a> {
    /// Issue a 303 redirect to the target.
    Redirect(&'a str),
    /// Send the body as the whole HTTP response.
    Raw(&'a [u8]),
    /// Embed the body into the page layout.
    Embed(&'a [u8]),
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response that only redirects.
    pub fn redirect_to(target: impl Into<String>) -> Self {
        Self {
            redirect: target.into(),
            ..Self::default()
        }
    }

    /// Append `p` to the body. Always accepts all of `p`.
    pub fn write(&mut self, p: &[u8]) -> usize {
        self.body.extend_from_slice(p);
        p.len()
    }

    /// Decide how to deliver this response. A redirect wins over `raw`.
    pub fn disposition(&self) -> Disposition<'_> {
        if !self.redirect.is_empty() {
            Disposition::Redirect(&self.redirect)
        } else if self.raw {
            Disposition::Raw(&self.body)
        } else {
            Disposition::Embed(&self.body)
        }
    }

    /// The updated node if the service sent one, otherwise `sent`.
    pub fn node_or<'a>(&'a self, sent: &'a NodeInfo) -> &'a NodeInfo {
        self.node.as_ref().unwrap_or(sent)
    }
}

impl io::Write for Response {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Response::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn writes_append() {
        let mut res = Response::new();
        assert_eq!(res.write(b"ab"), 2);
        assert_eq!(res.write(b"cd"), 2);
        assert_eq!(res.body, b"abcd");
    }

    #[test]
    fn io_write_appends() {
        let mut res = Response::new();
        write!(res, "<p>{}</p>", 42).unwrap();
        assert_eq!(io::Write::write(&mut res, b"!").unwrap(), 1);
        assert_eq!(res.body, b"<p>42</p>!");
    }

    #[test]
    fn disposition_prefers_redirect() {
        let mut res = Response::redirect_to("/login");
        res.raw = true;
        assert_eq!(res.disposition(), Disposition::Redirect("/login"));

        res.redirect.clear();
        assert_eq!(res.disposition(), Disposition::Raw(b""));

        res.raw = false;
        res.write(b"x");
        assert_eq!(res.disposition(), Disposition::Embed(b"x"));
    }

    #[test]
    fn node_or_falls_back_to_sent_node() {
        let sent = NodeInfo::new("/a");
        let mut res = Response::new();
        assert_eq!(res.node_or(&sent).path, "/a");

        res.node = Some(NodeInfo {
            title: "New".into(),
            ..NodeInfo::new("/a")
        });
        assert_eq!(res.node_or(&sent).title, "New");
    }

    #[test]
    fn roundtrip_keeps_body_bytes() {
        let mut res = Response::new();
        res.write(&[0, 159, 255]);
        res.raw = true;
        let json = serde_json::to_string(&res).unwrap();
        assert!(!json.contains("redirect"));
        assert!(!json.contains("\"node\""));
        let back: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(back, res);
    }
}
