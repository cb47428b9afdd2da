//! Login Page
//!
//! Email/password form. Failures are shown inline and leave the form as is.

use leptos::*;
use leptos_router::*;

use crate::state::use_session;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if session.loading.get_untracked() {
            return;
        }

        let navigate = navigate.clone();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            if session.login(email, password).await {
                navigate("/dashboard", Default::default());
            }
        });
    };

    view! {
        <Show when=move || session.user.with(Option::is_some)>
            <Redirect path="/dashboard" />
        </Show>

        <div class="min-h-screen bg-gray-50 flex items-center justify-center">
            <form on:submit=on_submit class="bg-white rounded-xl shadow p-8 w-full max-w-sm space-y-5">
                <div>
                    <h1 class="text-2xl font-bold">"Sign In"</h1>
                    <p class="text-gray-500 text-sm mt-1">"Welcome back to TaskFlow"</p>
                </div>

                {move || session.error.get().map(|msg| view! {
                    <div class="bg-red-50 text-red-700 text-sm rounded-lg px-4 py-3">{msg}</div>
                })}

                <div>
                    <label class="block text-sm text-gray-600 mb-2">"Email"</label>
                    <input
                        type="email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full rounded-lg px-4 py-3 border border-gray-300 focus:border-green-600 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-600 mb-2">"Password"</label>
                    <input
                        type="password"
                        required=true
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="w-full rounded-lg px-4 py-3 border border-gray-300 focus:border-green-600 focus:outline-none"
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || session.loading.get()
                    class="w-full py-3 bg-green-700 hover:bg-green-800 disabled:bg-gray-400
                           text-white rounded-lg font-medium transition-colors"
                >
                    {move || if session.loading.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}
