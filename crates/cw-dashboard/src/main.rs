//! Crime Watch Dashboard

mod app;
mod browser;
mod components;
mod pages;
mod state;

use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let config = browser::injected_config();
    let payload = browser::injected_payload();

    mount_to_body(move || {
        view! {
            <app::App config=config payload=payload/>
        }
    });
}
