//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod analytics_bars;
pub mod loading;
pub mod progress_ring;
pub mod project_list;
pub mod sidebar;
pub mod stat_card;
pub mod stopwatch;
pub mod team_list;

pub use analytics_bars::AnalyticsBars;
pub use loading::{CardSkeleton, ListSkeleton};
pub use progress_ring::ProgressRing;
pub use project_list::ProjectList;
pub use sidebar::Sidebar;
pub use stat_card::StatCard;
pub use stopwatch::Stopwatch;
pub use team_list::TeamList;
