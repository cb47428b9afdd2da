//! API Access
//!
//! HTTP calls to the TaskFlow API.

pub mod client;

pub use client::{
    fetch_overview, fetch_products, fetch_users, get_api_base, login, set_api_base, FetchError,
};
