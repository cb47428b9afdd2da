//! App Root Component
//!
//! Routing, the session provider and the access guard.

use leptos::*;
use leptos_router::*;

use crate::components::Sidebar;
use crate::pages::{Dashboard, Login, Placeholder, Settings};
use crate::state::{provide_session, use_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_session();

    view! {
        <Router>
            <Routes>
                <Route path="/login" view=Login />
                <Route path="/" view=|| view! { <Protected><Dashboard /></Protected> } />
                <Route path="/dashboard" view=|| view! { <Protected><Dashboard /></Protected> } />
                <Route path="/tasks" view=|| view! { <Protected><Placeholder title="Tasks" /></Protected> } />
                <Route path="/calendar" view=|| view! { <Protected><Placeholder title="Calendar" /></Protected> } />
                <Route path="/analytics" view=|| view! { <Protected><Placeholder title="Analytics" /></Protected> } />
                <Route path="/team" view=|| view! { <Protected><Placeholder title="Team" /></Protected> } />
                <Route path="/settings" view=|| view! { <Protected><Settings /></Protected> } />
                <Route path="/help" view=|| view! { <Protected><Placeholder title="Help" /></Protected> } />
                <Route path="/*any" view=NotFound />
            </Routes>
        </Router>
    }
}

/// Renders its children inside the app shell for an authenticated session,
/// otherwise redirects to the login page without rendering them
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || {
        if session.user.with(Option::is_some) {
            view! {
                <div class="min-h-screen bg-gray-50 flex">
                    <Sidebar />
                    <main class="flex-1 px-8 py-6">{children()}</main>
                </div>
            }
            .into_view()
        } else {
            view! { <Redirect path="/login" /> }.into_view()
        }
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-green-700 hover:bg-green-800 text-white rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
