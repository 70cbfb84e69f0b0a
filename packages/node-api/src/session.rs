//! Opaque user session carried through node requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The session of the user on whose behalf a request is made.
///
/// The protocol layer never looks inside: the front end puts whatever its
/// session mechanism produces in here, and the Node service reads it back.
/// Serialises transparently as the wrapped JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserSession(Value);

impl UserSession {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The session of a visitor that is not logged in (`null`).
    pub fn anonymous() -> Self {
        Self(Value::Null)
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
