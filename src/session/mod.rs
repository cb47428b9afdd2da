//! Session Management
//!
//! - **Record**: the opaque user object returned by the login endpoint
//! - **Storage**: durable key-value storage for the record
//! - **Store**: login/logout state holder shared by every view

mod record;
mod storage;
mod store;

pub use record::SessionRecord;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError, StorageResult};
pub use store::{LoginError, SessionState, SessionStore, INVALID_CREDENTIALS, SESSION_KEY};
