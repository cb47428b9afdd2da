//! # TaskFlow
//!
//! Client-side core of the TaskFlow task-management app: who is logged in,
//! how the API is reached, and what the dashboard shows.
//!
//! ## Modules
//!
//! - [`session`]: Session store with durable persistence
//! - [`client`]: Authenticated API client with shape normalization and cancellation
//! - [`guard`]: Route table and access guard
//! - [`stats`]: Derived dashboard statistics and their fallback chain
//! - [`dashboard`]: Dashboard view model (concurrent section loading)
//! - [`timer`]: Stopwatch for the time tracker widget
//! - [`mock`]: Local mock of the TaskFlow API, built with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskflow::client::ApiClient;
//! use taskflow::config::Config;
//! use taskflow::dashboard::Dashboard;
//! use taskflow::session::{FileStorage, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ApiClient::from_config(&config.api)?;
//!     let storage = Arc::new(FileStorage::new(config.session.storage_path()));
//!
//!     let session = SessionStore::new(client.clone(), storage);
//!     session.login("user1@example.com", "password123").await?;
//!
//!     let dashboard = Dashboard::mount(client, &session);
//!     dashboard.settled().await;
//!     println!("{:?}", dashboard.stats());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod guard;
pub mod logging;
pub mod mock;
pub mod session;
pub mod stats;
pub mod timer;

// Re-export top-level types for convenience
pub use client::{ApiClient, ApiError, ApiResult, Overview, Product, Resource, TeamMember, ViewScope};

pub use session::{
    FileStorage, LoginError, MemoryStorage, SessionRecord, SessionState, SessionStorage,
    SessionStore, StorageError,
};

pub use guard::{AccessState, Admission, Route, RouterGuard};

pub use stats::ProjectStats;

pub use dashboard::{Dashboard, DashboardState, Section, TaskStatus};

pub use timer::Stopwatch;

pub use config::{Config, ConfigError, LoggingConfig};
