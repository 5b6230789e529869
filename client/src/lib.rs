//! # client
//!
//! Leptos + WASM front-end for the memory trainer. Renders the sequence
//! recall and card matching games and keeps them in step with the game API
//! through the shared `game` sync core.
//!
//! Browser-only code is compiled under the `csr` feature. Without it every
//! browser hook degrades to a no-op so the crate still builds and tests on
//! the host.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger was already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
