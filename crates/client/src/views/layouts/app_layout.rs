//! Shell around every screen: header, content and the bottom tab bar.

use dioxus::prelude::*;

use crate::components::layout::{Header, Navigation};
use crate::hooks::{use_api, use_app_state, use_host};
use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    let host = use_host();
    let api = use_api();
    let mut app = use_app_state();
    let nav = use_navigator();
    let route = use_route::<Route>();

    // Register the user with the backend once per launch
    let identity = host.identity().cloned();
    use_future(move || {
        let api = api.clone();
        let identity = identity.clone();
        async move {
            let Some(identity) = identity else {
                return;
            };
            if let Some(resp) = api.authenticate(&identity).await {
                crate::log_info!("Authenticated as {}", resp.user.telegram_id);
                app.account.set(Some(resp.user));
            }
        }
    });

    // Host back button on every screen but the dashboard
    let back_host = host.clone();
    use_effect(use_reactive((&route,), move |(route,)| {
        if matches!(route, Route::DashboardPage {}) {
            back_host.hide_back_button();
        } else {
            back_host.show_back_button(move || nav.go_back());
        }
    }));

    let user_name = host.identity().map(|u| u.display_name());
    let theme = if host.is_dark() { "dark" } else { "" };

    rsx! {
        div { class: "min-h-screen flex flex-col bg-[#1a1a2e] text-white {theme}",
            Header { user_name, premium: app.is_premium() }
            main { class: "flex-1 w-full max-w-[400px] mx-auto px-5 pt-5 pb-28 fade-in",
                Outlet::<Route> {}
            }
            Navigation {}
        }
    }
}
