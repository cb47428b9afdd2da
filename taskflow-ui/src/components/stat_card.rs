//! Stat Card Component
//!
//! One dashboard figure.

use leptos::*;

/// Stat card component
#[component]
pub fn StatCard(
    label: &'static str,
    value: i64,
    /// Filled green, for the headline figure
    #[prop(optional)]
    highlighted: bool,
) -> impl IntoView {
    let class = if highlighted {
        "bg-green-800 text-white rounded-xl p-5"
    } else {
        "bg-white rounded-xl p-5"
    };

    view! {
        <div class=class>
            <span class="text-sm opacity-80">{label}</span>
            <div class="text-4xl font-bold mt-3">{value}</div>
        </div>
    }
}
