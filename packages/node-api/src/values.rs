//! Multi-valued string mapping for URL query parameters and form fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use urlencoding::{decode, encode};

/// Errors that can occur when parsing `application/x-www-form-urlencoded`
/// text.
#[derive(Debug, Error, PartialEq)]
pub enum ValuesError {
    #[error("invalid UTF-8 after percent-decoding '{0}'")]
    InvalidUtf8(String),
}

/// Ordered multi-valued mapping from keys to string values.
///
/// A key may map to more than one value. Values for the same key keep their
/// insertion order. Keys are held sorted so that a serialised mapping is
/// byte-for-byte stable.
///
/// Serialises as a JSON object of arrays:
///
/// ```json
/// { "page": ["2"], "tag": ["rust", "cms"] }
/// ```
///
/// A key never maps to an empty list: keys with `[]` are dropped when
/// deserialising.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Values(BTreeMap<String, Vec<String>>);

impl<'de> Deserialize<'de> for Values {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let mut map = BTreeMap::<String, Vec<String>>::deserialize(de)?;
        map.retain(|_, values| !values.is_empty());
        Ok(Self(map))
    }
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string or url-encoded form body.
    ///
    /// Pairs are separated by `&`; a pair without `=` maps the key to the
    /// empty string. `+` decodes to a space. A leading `?` is ignored.
    pub fn parse(input: &str) -> Result<Self, ValuesError> {
        let mut values = Self::new();
        let input = input.strip_prefix('?').unwrap_or(input);
        for pair in input.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            values.add(unescape(key)?, unescape(value)?);
        }
        Ok(values)
    }

    /// Encode as `key=value` pairs joined by `&`, keys in sorted order.
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// The first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values for `key`, in insertion order. Empty if absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append `value` to the values for `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replace all values for `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Remove `key` and return its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(key, value)` pairs; keys sorted, values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.add(k, v);
        }
        values
    }
}

fn unescape(s: &str) -> Result<String, ValuesError> {
    let spaced = s.replace('+', " ");
    decode(&spaced)
        .map(|c| c.into_owned())
        .map_err(|_| ValuesError::InvalidUtf8(s.to_string()))
}
