//! Loading Component
//!
//! Skeleton states shown while a section is loading.

use leptos::*;

/// Skeleton loader for stat cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-5 animate-pulse">
            <div class="h-4 bg-gray-200 rounded w-1/2 mb-4" />
            <div class="h-8 bg-gray-200 rounded w-1/3" />
        </div>
    }
}

/// Skeleton loader for list items
#[component]
pub fn ListSkeleton(
    #[prop(default = 3)]
    count: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|_| view! {
                <div class="bg-gray-200 rounded h-10" />
            }).collect_view()}
        </div>
    }
}
