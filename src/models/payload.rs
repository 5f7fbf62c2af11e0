use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::INVALID_API_KEY;

/// A parsed response body, passed through as-is.
///
/// Resource objects are not modelled; the accessors only cover the
/// envelope fields every endpoint shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    /// Wraps a JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the resource-level `success` flag (if present).
    pub fn success(&self) -> Option<bool> {
        self.0.get("success").and_then(Value::as_bool)
    }

    /// Returns the `result` object (if present).
    ///
    /// Batch endpoints such as `/users` put their results elsewhere
    /// (e.g. `uids`); use the [`Deref`] to [`Value`] for those.
    pub fn result(&self) -> Option<&Value> {
        self.0.get("result")
    }

    /// Returns the `message` field (if present).
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Returns `true` if upstream rejected the API key.
    pub fn is_invalid_api_key(&self) -> bool {
        self.message() == Some(INVALID_API_KEY)
    }

    /// Consumes the payload and returns the raw JSON.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl Deref for Payload {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_accessors() {
        let payload = Payload::new(json!({
            "success": true,
            "result": { "uid": 2_240_993, "username": "DrDoof" }
        }));
        assert_eq!(payload.success(), Some(true));
        assert_eq!(payload.result().unwrap()["username"], "DrDoof");
        assert_eq!(payload.message(), None);
        assert!(!payload.is_invalid_api_key());
    }

    #[test]
    fn detects_rejected_key() {
        let payload: Payload =
            serde_json::from_str(r#"{"success":false,"message":"INVALID_API_KEY"}"#).unwrap();
        assert!(payload.is_invalid_api_key());
    }

    #[test]
    fn other_messages_are_not_key_errors() {
        let payload = Payload::new(json!({ "success": false, "message": "NOT_FOUND" }));
        assert!(!payload.is_invalid_api_key());
        assert_eq!(payload.success(), Some(false));
    }

    #[test]
    fn non_object_bodies_pass_through() {
        let payload: Payload = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(payload.success(), None);
        assert!(!payload.is_invalid_api_key());
        assert_eq!(payload.into_inner(), json!([1, 2, 3]));
    }

    #[test]
    fn batch_fields_reachable_through_deref() {
        let payload = Payload::new(json!({ "uids": [{ "success": true }] }));
        assert_eq!(payload["uids"][0]["success"], true);
        assert!(payload.result().is_none());
    }
}
