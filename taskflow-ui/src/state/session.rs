//! Session State
//!
//! Who is logged in, shared with every component through context. The user
//! record is whatever the login endpoint returned, persisted in local storage
//! under `taskflow_user`.

use leptos::*;
use serde_json::Value;

use crate::api::{self, client::INVALID_CREDENTIALS, FetchError};

/// Local storage key of the persisted session
pub const SESSION_KEY: &str = "taskflow_user";

/// Session state provided to all components
#[derive(Clone, Copy)]
pub struct Session {
    /// Authenticated user record, `None` when anonymous
    pub user: RwSignal<Option<Value>>,
    /// A login request is in flight
    pub loading: RwSignal<bool>,
    /// Last login error
    pub error: RwSignal<Option<String>>,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Parse a persisted record; malformed data counts as no session
pub fn parse_record(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::warn_1(&format!("Discarding stored session: {}", e).into());
            None
        }
    }
}

fn restore() -> Option<Value> {
    let raw = storage()?.get_item(SESSION_KEY).ok().flatten()?;
    parse_record(&raw)
}

/// Message shown for a failed login
pub fn login_error_message(err: &FetchError) -> String {
    match err {
        FetchError::Status { message, .. } => message
            .clone()
            .unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
        other => other.to_string(),
    }
}

/// Provide the session to the component tree
pub fn provide_session() {
    let session = Session {
        user: create_rw_signal(restore()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
    };

    provide_context(session);
}

/// Session from context
pub fn use_session() -> Session {
    use_context::<Session>().expect("Session not found")
}

impl Session {
    /// Read untracked, for route guards and event handlers
    pub fn is_authenticated(&self) -> bool {
        self.user.with_untracked(Option::is_some)
    }

    /// Bearer token of the current session
    pub fn token(&self) -> Option<String> {
        self.user.with_untracked(|u| {
            u.as_ref()
                .and_then(|u| u.get("token"))
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> Option<String> {
        self.user.with(|u| {
            let u = u.as_ref()?;
            ["name", "username", "email"]
                .iter()
                .find_map(|k| u.get(*k).and_then(Value::as_str))
                .map(str::to_string)
        })
    }

    /// Log in; on success the record is kept and persisted
    pub async fn login(&self, email: String, password: String) -> bool {
        self.loading.set(true);
        self.error.set(None);

        let result = api::login(&email, &password).await;

        self.loading.set(false);
        match result {
            Ok(record) => {
                if let Some(storage) = storage() {
                    if let Err(e) = storage.set_item(SESSION_KEY, &record.to_string()) {
                        web_sys::console::warn_1(&e);
                    }
                }
                self.user.set(Some(record));
                true
            }
            Err(e) => {
                self.error.set(Some(login_error_message(&e)));
                false
            }
        }
    }

    /// Forget the session in memory and in storage
    pub fn logout(&self) {
        self.user.set(None);
        if let Some(storage) = storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        assert!(parse_record(r#"{"email":"a@b.c"}"#).is_some());
        assert!(parse_record("null").is_none());
    }

    #[test]
    fn test_login_error_message() {
        let err = FetchError::Status {
            status: 401,
            message: Some("User not found".into()),
        };
        assert_eq!(login_error_message(&err), "User not found");

        let err = FetchError::Status {
            status: 400,
            message: None,
        };
        assert_eq!(login_error_message(&err), INVALID_CREDENTIALS);
    }
}
