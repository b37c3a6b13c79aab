//! Server list with free and premium sections.

use dioxus::prelude::*;
use matreshka_shared::Server;

use crate::catalog::{Selection, ServerCatalog};
use crate::components::ui::{Button, ButtonVariant, LoadingSpinner, PremiumModal};
use crate::components::vpn::ServerItem;
use crate::hooks::{use_api, use_app_state, use_host};
use crate::host::HapticStyle;
use crate::request_state::Operation;
use crate::Route;

#[component]
pub fn ServersPage() -> Element {
    let host = use_host();
    let api = use_api();
    let mut app = use_app_state();
    let nav = use_navigator();
    let mut upsell = use_signal(|| None::<Server>);

    let mut servers = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { ServerCatalog::from_response(api.list_servers().await) }
        }
    });

    let on_select = {
        let host = host.clone();
        move |id: String| {
            let Some(catalog) = servers.read().clone() else {
                return;
            };
            match catalog.select(&id, app.is_premium()) {
                Selection::Selected(server) => {
                    host.haptic(HapticStyle::Success);
                    app.selected_server.set(Some(server));
                }
                Selection::NeedsPremium(server) => {
                    host.haptic(HapticStyle::Error);
                    upsell.set(Some(server));
                }
                Selection::Unknown => {}
            }
        }
    };

    let on_upgrade = {
        let host = host.clone();
        move |_| {
            host.haptic(HapticStyle::Success);
            upsell.set(None);
            nav.push(Route::SubscriptionPage {});
        }
    };

    let selected_id = app.selected_server.read().as_ref().map(|s| s.id.clone());
    let premium_user = app.is_premium();
    let error = api.error(Operation::ListServers);

    rsx! {
        div {
            h1 { class: "text-2xl font-semibold text-center mb-1", "Серверы" }
            p { class: "text-sm text-center text-[#FFD700] opacity-80 mb-6", "Выберите локацию для подключения" }

            match servers.read().as_ref() {
                None => rsx! { LoadingSpinner { text: "Загружаем серверы..." } },
                Some(catalog) if catalog.is_empty() => rsx! {
                    div { class: "rounded-2xl p-8 text-center bg-white/5 border border-white/10",
                        div { class: "text-5xl mb-3", "🌐" }
                        p { class: "text-[#b0b8c5] mb-4", "Список серверов пока пуст" }
                        if let Some(error) = error.as_ref() {
                            p { class: "text-sm text-[#f44336] mb-4", "{error}" }
                        }
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| servers.restart(),
                            "Обновить"
                        }
                    }
                },
                Some(catalog) => rsx! {
                    section { class: "mb-6",
                        h3 { class: "text-sm uppercase tracking-wide text-[#b0b8c5] mb-3", "Бесплатные серверы" }
                        div { class: "space-y-2",
                            for server in catalog.free().cloned() {
                                ServerItem {
                                    key: "{server.id}",
                                    selected: selected_id.as_deref() == Some(server.id.as_str()),
                                    locked: false,
                                    server,
                                    on_select: on_select.clone(),
                                }
                            }
                        }
                    }
                    section {
                        h3 { class: "text-sm uppercase tracking-wide text-[#FFD700] mb-3", "👑 Premium серверы" }
                        div { class: "space-y-2",
                            for server in catalog.premium().cloned() {
                                ServerItem {
                                    key: "{server.id}",
                                    selected: selected_id.as_deref() == Some(server.id.as_str()),
                                    locked: !premium_user,
                                    server,
                                    on_select: on_select.clone(),
                                }
                            }
                        }
                    }
                },
            }

            if let Some(server) = upsell.read().as_ref() {
                PremiumModal {
                    server_name: Some(server.name.clone()),
                    on_close: move |_| upsell.set(None),
                    on_upgrade: on_upgrade.clone(),
                }
            }
        }
    }
}
