//! Analytics Bars Component
//!
//! Weekly bar chart with fixed sample data.

use leptos::*;

use crate::state::dashboard::WEEK_BARS;

#[component]
pub fn AnalyticsBars() -> impl IntoView {
    view! {
        <div class="flex items-end justify-between h-48 px-2">
            {WEEK_BARS.iter().map(|&(day, height, filled, highlighted)| {
                let bar_class = match (filled, highlighted) {
                    (_, true) => "w-10 rounded-full bg-green-500",
                    (true, false) => "w-10 rounded-full bg-green-800",
                    (false, false) => "w-10 rounded-full bg-stripes border border-gray-300",
                };
                view! {
                    <div class="flex flex-col items-center h-full justify-end">
                        <div class=bar_class style=format!("height: {}%", height) />
                        <span class="text-sm text-gray-500 mt-2">{day.to_string()}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
