//! Sourcebook Web Client
//!
//! Citation manager frontend built with Leptos (WASM).
//!
//! # Routes
//!
//! - `/<project>/edit`: edit project metadata and its sources
//! - `/<project>` or `/<project>/<anything>`: read-only view
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the project/source backend over HTTP/JSON.

use leptos::*;

mod api;
mod app;
mod components;
mod route;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
