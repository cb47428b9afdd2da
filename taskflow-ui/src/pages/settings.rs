//! Settings Page
//!
//! API origin and account.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::use_session;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-500 mt-1">"Configure your TaskFlow dashboard"</p>
            </div>

            <ApiSettings />
            <AccountSection />
        </div>
    }
}

/// API origin, stored in local storage
#[component]
fn ApiSettings() -> impl IntoView {
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (saved, set_saved) = create_signal(false);

    let save_url = move |_| {
        api::set_api_base(&api_url.get_untracked());
        set_saved.set(true);
    };

    view! {
        <section class="bg-white rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <label class="block text-sm text-gray-500 mb-2">"TaskFlow API URL"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| {
                        set_saved.set(false);
                        set_api_url.set(event_target_value(&ev));
                    }
                    class="flex-1 rounded-lg px-4 py-3 border border-gray-300 focus:border-green-600 focus:outline-none"
                />
                <button
                    on:click=save_url
                    class="px-4 py-3 bg-green-700 hover:bg-green-800 text-white rounded-lg font-medium transition-colors"
                >
                    "Save"
                </button>
            </div>
            <Show when=move || saved.get()>
                <p class="text-sm text-green-700 mt-2">"Saved. New requests use this URL."</p>
            </Show>
        </section>
    }
}

#[component]
fn AccountSection() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.logout();
        navigate("/login", Default::default());
    };

    view! {
        <section class="bg-white rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Account"</h2>
            <p class="text-gray-500 mb-4">
                {move || session.display_name().unwrap_or_else(|| "Unknown user".to_string())}
            </p>
            <button
                on:click=logout
                class="px-4 py-3 bg-red-600 hover:bg-red-700 text-white rounded-lg font-medium transition-colors"
            >
                "Logout"
            </button>
        </section>
    }
}
