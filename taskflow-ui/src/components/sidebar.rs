//! Sidebar Component
//!
//! Navigation links and logout.

use leptos::*;
use leptos_router::*;

use crate::state::use_session;

/// Sidebar navigation component
#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.logout();
        navigate("/login", Default::default());
    };

    view! {
        <aside class="w-60 bg-white border-r border-gray-200 flex flex-col py-6 px-4">
            <A href="/dashboard" class="text-2xl font-bold text-green-800 px-3 mb-8">"TaskFlow"</A>

            <nav class="flex-1 space-y-1">
                <SidebarLink href="/dashboard" label="Dashboard" />
                <SidebarLink href="/tasks" label="Tasks" />
                <SidebarLink href="/calendar" label="Calendar" />
                <SidebarLink href="/analytics" label="Analytics" />
                <SidebarLink href="/team" label="Team" />
            </nav>

            <div class="space-y-1 border-t border-gray-200 pt-4">
                <SidebarLink href="/settings" label="Settings" />
                <SidebarLink href="/help" label="Help" />
                <button
                    on:click=logout
                    class="w-full text-left px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-100 transition-colors"
                >
                    "Logout"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn SidebarLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="block px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-100 transition-colors"
            active_class="bg-green-50 text-green-800 font-medium"
        >
            {label}
        </A>
    }
}
