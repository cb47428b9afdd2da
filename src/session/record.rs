//! Session record
//!
//! The authenticated user object returned by `POST /api/login`. The server
//! decides its shape; only `email` and `token` are ever looked at.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque user record adopted wholesale from the login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(Value);

impl SessionRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Email-like identifier of the user, if the server sent one
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    /// Bearer token, if the server sent a non-empty one
    pub fn token(&self) -> Option<&str> {
        self.0
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Name to greet the user with: local part of the email
    pub fn display_name(&self) -> Option<&str> {
        self.email()
            .and_then(|email| email.split('@').next())
            .filter(|name| !name.is_empty())
    }

    /// A `null` body names no user and never counts as a session
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Raw JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Serialize for persistence
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    /// Parse a persisted record
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let record = SessionRecord::new(json!({
            "email": "user1@example.com",
            "token": "abc",
            "role": "admin"
        }));

        assert_eq!(record.email(), Some("user1@example.com"));
        assert_eq!(record.token(), Some("abc"));
        assert_eq!(record.display_name(), Some("user1"));
        assert_eq!(record.as_value()["role"], "admin");
    }

    #[test]
    fn test_missing_or_empty_token() {
        let record = SessionRecord::new(json!({ "email": "a@b.c" }));
        assert_eq!(record.token(), None);

        let record = SessionRecord::new(json!({ "email": "a@b.c", "token": "" }));
        assert_eq!(record.token(), None);

        let record = SessionRecord::new(json!({ "token": 42 }));
        assert_eq!(record.token(), None);
        assert_eq!(record.display_name(), None);
    }

    #[test]
    fn test_json_roundtrip_preserves_unknown_fields() {
        let raw = r#"{"email":"user1@example.com","token":"abc","extra":{"n":1}}"#;
        let record = SessionRecord::from_json(raw).unwrap();
        let again = SessionRecord::from_json(&record.to_json()).unwrap();
        assert_eq!(record, again);
        assert_eq!(again.as_value()["extra"]["n"], 1);
    }

    #[test]
    fn test_null_record() {
        assert!(SessionRecord::from_json("null").unwrap().is_null());
        assert!(!SessionRecord::new(json!({})).is_null());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SessionRecord::from_json("{not json").is_err());
    }
}
