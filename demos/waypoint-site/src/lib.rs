//! Waypoint demo site
//!
//! Every route of the site table rendered with Leptos:
//! - Nested, layout and prefix routes
//! - Optional (`/:lang?/categories`) and wildcard (`/files/*`) segments
//! - Loaders and actions as server functions
//! - The signup wizard as nested step routes

mod api;
mod app;
mod wizard;

#[cfg(feature = "ssr")]
mod server;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
