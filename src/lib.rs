//! # fingpt-web
//!
//! Leptos + WASM sign-in client for the FinGPT backend.
//!
//! This crate contains the credential validator, the global popup store, the
//! token-backed auth session, route guards, and the HTTP client adapter that
//! attaches the bearer token and unwraps the backend's response envelope.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("logger already initialized: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
