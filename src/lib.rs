//! # rbac-admin
//!
//! Leptos + WASM front end for role-based user administration. Users sign in
//! against an external REST backend and manage accounts carrying one of four
//! fixed roles (admin, manager, editor, viewer).
//!
//! The load-bearing piece is the `session` module: bearer-token persistence,
//! advisory payload decoding, validity evaluation, and change propagation
//! across components and browser tabs. Pages and components are thin views
//! over the `state::auth` context it feeds.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

/// WASM entry point for the hydrate build.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}
