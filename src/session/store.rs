//! Session Store
//!
//! Single source of truth for "who is logged in". State lives in a
//! `tokio::sync::watch` channel: reads are synchronous snapshots and every
//! mutation goes through [`SessionStore::login`] / [`SessionStore::logout`].

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use super::record::SessionRecord;
use super::storage::SessionStorage;
use crate::client::{ApiClient, ApiError};

/// Storage key of the persisted session record
pub const SESSION_KEY: &str = "taskflow_user";

/// Message shown when the server rejects a login without saying why
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Observable session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Authenticated user, `None` when anonymous
    pub user: Option<SessionRecord>,
    /// A login request is in flight
    pub loading: bool,
    /// Last user-visible error
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Why a login attempt failed. `Display` is the user-visible message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoginError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request could not complete
    #[error("{0}")]
    Transport(String),

    /// The server accepted the credentials but sent an unreadable body
    #[error("{0}")]
    InvalidResponse(String),

    /// The session could not be persisted
    #[error("Could not save session: {0}")]
    Storage(String),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => LoginError::Rejected {
                status,
                message: message.unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
            },
            ApiError::Decode(_) => LoginError::InvalidResponse(err.to_string()),
            ApiError::Transport(_) => LoginError::Transport(err.to_string()),
        }
    }
}

/// Holds the authenticated user record and keeps it persisted
pub struct SessionStore {
    client: ApiClient,
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create the store, restoring a previously persisted session.
    ///
    /// Absent, unreadable or malformed stored data yields an anonymous store.
    pub fn new(client: ApiClient, storage: Arc<dyn SessionStorage>) -> Self {
        let user = restore(storage.as_ref());
        let (state, _) = watch::channel(SessionState {
            user,
            ..Default::default()
        });

        Self {
            client,
            storage,
            state,
        }
    }

    /// API client the store authenticates against
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Snapshot of the whole state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn user(&self) -> Option<SessionRecord> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    /// Bearer token of the current session
    pub fn token(&self) -> Option<String> {
        self.state
            .borrow()
            .user
            .as_ref()
            .and_then(|u| u.token().map(str::to_string))
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Replace the user-visible error
    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|s| s.error = error);
    }

    pub fn clear_error(&self) {
        self.set_error(None);
    }

    /// Log in with the given credentials.
    ///
    /// On success the whole response body becomes the session record, kept in
    /// memory and persisted. On failure the error message is also stored in
    /// the error state and no session is created. Concurrent calls are not
    /// deduplicated; the last one to settle decides the loading flag.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionRecord, LoginError> {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.authenticate(email, password).await;

        self.state.send_modify(|s| {
            s.loading = false;
            match &result {
                Ok(record) => s.user = Some(record.clone()),
                Err(e) => s.error = Some(e.to_string()),
            }
        });

        match &result {
            Ok(record) => tracing::info!(
                user = record.email().unwrap_or("<unknown>"),
                "Logged in"
            ),
            Err(e) => tracing::warn!(error = %e, "Login failed"),
        }

        result
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<SessionRecord, LoginError> {
        let value = self.client.login(email, password).await?;
        let record = SessionRecord::new(value);
        if record.is_null() {
            return Err(LoginError::InvalidResponse(
                "Invalid response: empty login body".to_string(),
            ));
        }

        self.storage
            .set_item(SESSION_KEY, &record.to_json())
            .map_err(|e| LoginError::Storage(e.to_string()))?;

        Ok(record)
    }

    /// Forget the session in memory and in storage. Never fails.
    pub fn logout(&self) {
        let had_session = self.state.borrow().user.is_some();
        self.state.send_modify(|s| s.user = None);

        if let Err(e) = self.storage.remove_item(SESSION_KEY) {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }

        if had_session {
            tracing::info!("Logged out");
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("client", &self.client)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

fn restore(storage: &dyn SessionStorage) -> Option<SessionRecord> {
    match storage.get_item(SESSION_KEY) {
        Ok(Some(raw)) => match SessionRecord::from_json(&raw) {
            Ok(record) if record.is_null() => None,
            Ok(record) => {
                tracing::debug!("Restored persisted session");
                Some(record)
            }
            Err(e) => {
                tracing::warn!("Discarding malformed persisted session: {}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read persisted session: {}", e);
            None
        }
    }
}
