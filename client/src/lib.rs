//! # client
//!
//! Leptos + WASM frontend for the Fixlit lighting dashboard.
//!
//! This crate contains the sign-in, sign-up, password-reset, and dashboard
//! pages, their components, the reactive session and panel state, and the
//! HTTP and WebSocket plumbing that keeps the panels in step with the store.
//! Panel rules themselves live in the shared `panels` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
