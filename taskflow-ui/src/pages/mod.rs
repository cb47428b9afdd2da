//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod login;
pub mod placeholder;
pub mod settings;

pub use dashboard::Dashboard;
pub use login::Login;
pub use placeholder::Placeholder;
pub use settings::Settings;
