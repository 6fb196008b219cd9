//! # client
//!
//! Leptos single-page frontend for the storefront and admin dashboards.
//!
//! This crate wires the `auth` core into the browser: it provides the
//! authentication state as context, gates every protected screen behind the
//! route guard, and hosts the sign-in and password-reset screens. Everything
//! presentational beyond that is placeholder markup.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
