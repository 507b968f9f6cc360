//! SympTrack
//!
//! Health tracking frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Symptom prediction with risk scoring
//! - Community health alerts and patient stories
//! - Nearby hospital finder
//! - Dashboard with health trends and risk analysis
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the SympTrack backend over HTTP; filtering,
//! list-view state and route gating come from the `symptrack` core crate.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
