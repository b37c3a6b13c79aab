//! MatreshkaVPN Client - Main entry point
//!
//! Telegram Mini App front end. Runs as WASM inside Telegram or a browser,
//! and as a desktop window for local development.

#![allow(non_snake_case)]

use dioxus::prelude::*;
use matreshka_client::{hooks::AppProvider, routes::Route};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Initialize tracing for desktop
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("matreshka_client=debug")),
            )
            .init();
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppProvider {
            Router::<Route> {}
        }
    }
}
