//! Dashboard Page
//!
//! Stat cards, project progress, team and time tracker. The three fetches
//! start together on mount and fill their own widgets as they arrive; leaving
//! the page aborts whatever is still in flight.

use leptos::*;
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;

use crate::api::{self, FetchError};
use crate::components::{
    AnalyticsBars, CardSkeleton, ListSkeleton, ProgressRing, ProjectList, StatCard, Stopwatch,
    TeamList,
};
use crate::state::dashboard::ProjectStats;
use crate::state::use_session;

/// Fetch owned by the mounted page
struct PageRequests {
    controller: Option<web_sys::AbortController>,
    closed: Rc<Cell<bool>>,
}

impl PageRequests {
    fn new() -> Self {
        let controller = web_sys::AbortController::new().ok();
        Self {
            controller,
            closed: Rc::new(Cell::new(false)),
        }
    }

    fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }

    fn close(&self) {
        self.closed.set(true);
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }
}

/// Store a settled fetch unless the page is gone
fn settle<T>(
    label: &str,
    closed: &Cell<bool>,
    result: Result<T, FetchError>,
    data: RwSignal<Option<T>>,
    loading: RwSignal<bool>,
) {
    if closed.get() {
        return;
    }
    loading.set(false);
    match result {
        Ok(value) => data.set(Some(value)),
        Err(FetchError::Aborted) => {}
        Err(e) => {
            web_sys::console::warn_1(&format!("Failed to fetch {}: {}", label, e).into());
        }
    }
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let token = session.token();

    let overview = create_rw_signal(None::<Value>);
    let products = create_rw_signal(None::<Vec<Value>>);
    let users = create_rw_signal(None::<Vec<Value>>);
    let overview_loading = create_rw_signal(true);
    let products_loading = create_rw_signal(true);
    let users_loading = create_rw_signal(true);

    let requests = PageRequests::new();

    {
        let (token, signal, closed) = (token.clone(), requests.signal(), requests.closed.clone());
        spawn_local(async move {
            let result = api::fetch_overview(token.as_deref(), signal.as_ref()).await;
            settle("overview", &closed, result, overview, overview_loading);
        });
    }
    {
        let (token, signal, closed) = (token.clone(), requests.signal(), requests.closed.clone());
        spawn_local(async move {
            let result = api::fetch_products(token.as_deref(), signal.as_ref()).await;
            settle("products", &closed, result, products, products_loading);
        });
    }
    {
        let (token, signal, closed) = (token, requests.signal(), requests.closed.clone());
        spawn_local(async move {
            let result = api::fetch_users(token.as_deref(), signal.as_ref()).await;
            settle("users", &closed, result, users, users_loading);
        });
    }

    on_cleanup(move || requests.close());

    let stats = create_memo(move |_| {
        let overview = overview.get();
        let products = products.get();
        ProjectStats::derive(overview.as_ref(), products.as_deref())
    });
    let stats_loading = move || overview_loading.get() && products_loading.get();

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-500 mt-1">"Plan, prioritize, and accomplish your tasks with ease."</p>
                </div>
                <div class="text-sm text-gray-500">
                    {move || session.display_name().map(|n| format!("Signed in as {}", n))}
                </div>
            </div>

            <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {move || {
                    if stats_loading() {
                        (0..4).map(|_| view! { <CardSkeleton /> }).collect_view()
                    } else {
                        let s = stats.get();
                        view! {
                            <StatCard label="Total Projects" value=s.total highlighted=true />
                            <StatCard label="Ended Projects" value=s.ended />
                            <StatCard label="Running Projects" value=s.running />
                            <StatCard label="Pending Project" value=s.pending />
                        }.into_view()
                    }
                }}
            </section>

            <div class="grid md:grid-cols-3 gap-6">
                <section class="bg-white rounded-xl p-6 md:col-span-2">
                    <h2 class="text-xl font-semibold mb-4">"Project Analytics"</h2>
                    <AnalyticsBars />
                </section>

                <section class="bg-white rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Projects"</h2>
                    {move || {
                        if products_loading.get() {
                            view! { <ListSkeleton count=5 /> }.into_view()
                        } else {
                            let items = products.get().unwrap_or_default();
                            view! { <ProjectList products=items /> }.into_view()
                        }
                    }}
                </section>
            </div>

            <div class="grid md:grid-cols-3 gap-6">
                <section class="bg-white rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Team Collaboration"</h2>
                    {move || {
                        if users_loading.get() {
                            view! { <ListSkeleton count=4 /> }.into_view()
                        } else {
                            let items = users.get().unwrap_or_default();
                            view! { <TeamList users=items /> }.into_view()
                        }
                    }}
                </section>

                <section class="bg-white rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Project Progress"</h2>
                    <ProgressRing percent=Signal::derive(move || stats.get().completion) />
                </section>

                <section class="bg-green-900 text-white rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Time Tracker"</h2>
                    <Stopwatch />
                </section>
            </div>
        </div>
    }
}
