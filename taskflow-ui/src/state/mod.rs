//! State Management
//!
//! Session state and dashboard data derivation.

pub mod dashboard;
pub mod session;

pub use session::{provide_session, use_session, Session};
