//! # discover-client
//!
//! Leptos + WASM frontend for the Discover media catalogue: browsing,
//! search, AI recommendations, a personal watchlist, and topic channels.
//!
//! Page state that should survive reloads is kept in per-page containers
//! (`state::page_state`) that write through to `localStorage` and reset
//! themselves after a period of inactivity.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and console logger, then hydrate
/// the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
