//! Team List Component
//!
//! Team members, their current task and a status badge.

use leptos::*;
use serde_json::Value;

use crate::state::dashboard::team_entries;

fn avatar_url(seed: &str) -> String {
    let seed: String = seed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed)
}

#[component]
pub fn TeamList(users: Vec<Value>) -> impl IntoView {
    view! {
        <ul class="space-y-4">
            {team_entries(&users).into_iter().map(|m| view! {
                <li class="flex items-center space-x-3">
                    <img class="w-10 h-10 rounded-full bg-gray-100" src=avatar_url(&m.avatar_seed) alt=m.name.clone() />
                    <div class="flex-1 min-w-0">
                        <div class="font-medium">{m.name}</div>
                        <div class="text-xs text-gray-500 truncate">"Working on " {m.task}</div>
                    </div>
                    <span class=format!("text-xs px-2 py-1 rounded-full {}", m.status.badge_class())>
                        {m.status.label()}
                    </span>
                </li>
            }).collect_view()}
        </ul>
    }
}
