//! Project List Component
//!
//! First five projects with due dates.

use leptos::*;
use serde_json::Value;

use crate::state::dashboard::project_entries;

#[component]
pub fn ProjectList(products: Vec<Value>) -> impl IntoView {
    view! {
        <ul class="space-y-4">
            {project_entries(&products).into_iter().map(|p| view! {
                <li class="flex flex-col">
                    <span class="font-medium">{p.name}</span>
                    <span class="text-xs text-gray-500">"Due date: " {p.due}</span>
                </li>
            }).collect_view()}
        </ul>
    }
}
