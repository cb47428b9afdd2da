//! Placeholder Page
//!
//! Sidebar destinations that have no content yet.

use leptos::*;

#[component]
pub fn Placeholder(title: &'static str) -> impl IntoView {
    view! {
        <div class="space-y-2">
            <h1 class="text-3xl font-bold">{title}</h1>
            <p class="text-gray-500">"Nothing here yet."</p>
        </div>
    }
}
