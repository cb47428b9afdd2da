//! TaskFlow Dashboard
//!
//! Task-management dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Login with a session persisted in local storage
//! - Protected routes guarded by the session
//! - Project statistics with graceful fallbacks when the API is incomplete
//! - Team, project and time tracker widgets
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the TaskFlow API over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
