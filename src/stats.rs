//! Derived project statistics
//!
//! Every dashboard figure is resolved through the same fallback chain,
//! evaluated per metric in this order:
//!
//! 1. the explicit field of the overview snapshot;
//! 2. a value derived from the product list (count, or a fixed ratio of the
//!    total);
//! 3. a fixed placeholder.
//!
//! `pending` has no placeholder of its own: without an overview field it is
//! always `total - ended - running`, which goes negative when the overview
//! reports inconsistent figures. That is displayed as-is. The subtraction
//! wraps instead of overflowing on extreme server counts.

use serde::Serialize;

use crate::client::{Overview, Product};

/// Total shown when neither overview nor product list is available
pub const PLACEHOLDER_TOTAL: i64 = 24;

/// Share of the total counted as ended when the overview is silent
pub const ENDED_RATIO: f64 = 0.42;

/// Share of the total counted as running when the overview is silent
pub const RUNNING_RATIO: f64 = 0.5;

/// Completion percentage shown when the total is zero or negative
pub const PLACEHOLDER_COMPLETION: f64 = 41.0;

/// Figures displayed on the dashboard stat cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: i64,
    pub ended_projects: i64,
    pub running_projects: i64,
    pub pending_projects: i64,
    /// Percentage of ended projects, 0-100 under sane inputs
    pub completion_rate: f64,
}

impl ProjectStats {
    /// Resolve all figures from whatever data is available
    pub fn derive(overview: Option<&Overview>, products: Option<&[Product]>) -> Self {
        let total = overview
            .and_then(Overview::total)
            .or_else(|| products.map(|p| p.len() as i64))
            .unwrap_or(PLACEHOLDER_TOTAL);

        let ended = overview
            .and_then(Overview::ended)
            .unwrap_or_else(|| round_half_up(total as f64 * ENDED_RATIO));

        let running = overview
            .and_then(Overview::running)
            .unwrap_or_else(|| round_half_up(total as f64 * RUNNING_RATIO));

        let pending = overview
            .and_then(Overview::pending)
            .unwrap_or_else(|| total.wrapping_sub(ended).wrapping_sub(running));

        let completion_rate = overview
            .and_then(|o| o.completion_rate)
            .unwrap_or_else(|| {
                if total > 0 {
                    round_half_up(ended as f64 / total as f64 * 100.0) as f64
                } else {
                    PLACEHOLDER_COMPLETION
                }
            });

        Self {
            total_projects: total,
            ended_projects: ended,
            running_projects: running,
            pending_projects: pending,
            completion_rate,
        }
    }

    /// Completion percentage without a trailing `.0`
    pub fn completion_label(&self) -> String {
        if self.completion_rate.fract() == 0.0 {
            format!("{}%", self.completion_rate as i64)
        } else {
            format!("{:.1}%", self.completion_rate)
        }
    }
}

/// Round to nearest, halves toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
