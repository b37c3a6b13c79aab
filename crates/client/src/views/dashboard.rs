//! Dashboard: connection toggle, status tiles and the session timer.

use std::rc::Rc;

use dioxus::prelude::*;
use matreshka_shared::Server;

use crate::catalog::ServerCatalog;
use crate::components::ui::{LoadingSpinner, StatCard};
use crate::components::vpn::{ConnectButton, ConnectionStatus};
use crate::format;
use crate::hooks::{use_api, use_app_state, use_host};
use crate::host::HapticStyle;
use crate::request_state::Operation;
use crate::session::ConnectionSession;
use crate::ticker::tick_callback;

#[component]
pub fn DashboardPage() -> Element {
    let host = use_host();
    let api = use_api();
    let mut app = use_app_state();

    // Written from the ticker task, hence sync storage
    let elapsed = use_signal_sync(|| 0u64);
    let mut current = use_signal(|| None::<Server>);

    let session = use_hook({
        let api = api.clone();
        let telegram_id = host.identity().map(|u| u.id);
        move || {
            telegram_id.map(|id| {
                let on_tick = tick_callback(move |secs| {
                    // A tick can land after the page is gone
                    let mut elapsed = elapsed;
                    if let Ok(mut value) = elapsed.try_write() {
                        *value = secs;
                    }
                });
                Rc::new(
                    api.session(id)
                        .with_session(ConnectionSession::new().with_tick_callback(on_tick)),
                )
            })
        }
    });

    use_drop({
        let session = session.clone();
        move || {
            if let Some(session) = &session {
                session.teardown();
            }
        }
    });

    let servers = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { ServerCatalog::from_response(api.list_servers().await) }
        }
    });

    // Fall back to the default pick until the user chooses a server
    use_effect(move || {
        if let Some(catalog) = servers.read().as_ref() {
            if app.selected_server.peek().is_none() {
                if let Some(server) = catalog.default_selection() {
                    app.selected_server.set(Some(server.clone()));
                }
            }
        }
    });

    // Auto-connect once, when the list first arrives
    let mut auto_connect_done = use_signal(|| false);
    use_effect({
        let host = host.clone();
        let session = session.clone();
        move || {
            let list = servers.read();
            let Some(catalog) = list.as_ref() else {
                return;
            };
            if *auto_connect_done.peek() {
                return;
            }
            auto_connect_done.set(true);

            let Some(session) = session.clone() else {
                return;
            };
            let settings = app.settings.peek().clone();
            let Some(server) = settings
                .auto_connect_target(catalog, session.is_connected())
                .cloned()
            else {
                return;
            };
            crate::log_info!("Auto-connecting to {}", server.id);
            app.selected_server.set(Some(server.clone()));

            let host = host.clone();
            spawn(async move {
                let ok = session.connect(server).await;
                let now = session.current_server();
                settings.notify_connection(&host, now.as_ref(), ok);
                current.set(now);
            });
        }
    });

    let on_toggle = {
        let host = host.clone();
        let session = session.clone();
        move |_| {
            let Some(session) = session.clone() else {
                host.alert("Не удалось определить пользователя Telegram");
                return;
            };
            let target = app.selected_server.read().clone();
            let settings = app.settings.read().clone();
            let host = host.clone();
            host.haptic(HapticStyle::Medium);
            spawn(async move {
                let ok = if session.is_connected() {
                    session.disconnect().await
                } else if let Some(server) = target {
                    session.connect(server).await
                } else {
                    host.alert("Выберите сервер");
                    return;
                };
                host.haptic(if ok {
                    HapticStyle::Success
                } else {
                    HapticStyle::Error
                });
                let now = session.current_server();
                settings.notify_connection(&host, now.as_ref(), ok);
                current.set(now);
            });
        }
    };

    let connected = current.read().is_some();
    let connecting = api.is_loading(Operation::Connect) || api.is_loading(Operation::Disconnect);
    let error = api
        .error(Operation::Connect)
        .or_else(|| api.error(Operation::Disconnect));
    let seconds = if connected { *elapsed.read() } else { 0 };
    let greeting = host.identity().map(|u| u.display_name());
    let has_target = app.selected_server.read().is_some();
    let server_tile = format::server_tile(
        current.read().as_ref(),
        app.selected_server.read().as_ref(),
    );

    rsx! {
        div { class: "space-y-5",
            div { class: "rounded-2xl p-5 text-center bg-gradient-to-br from-[#DC143C] to-[#8B0000] border border-[#FFD700]/20 shadow-xl",
                div { class: "text-5xl mb-2 matreshka-float glow-gold", "🪆" }
                div { class: "text-lg font-semibold", "Добро пожаловать!" }
                if let Some(name) = greeting {
                    div { class: "text-[#FFD700]", "{name}" }
                }
            }

            div { class: "grid grid-cols-2 gap-4",
                StatCard {
                    title: "Статус",
                    icon: "🔒",
                    value: if connected { "Защищено" } else { "Не защищено" },
                    color: if connected { "#4CAF50" } else { "#f44336" },
                }
                StatCard {
                    title: "Сервер",
                    icon: "🌍",
                    value: server_tile.unwrap_or_else(|| "Не выбран".to_string()),
                }
                StatCard {
                    title: "Время",
                    icon: "⏱️",
                    value: format::clock(seconds),
                    color: "#9C27B0",
                }
                StatCard {
                    title: "Доступ",
                    icon: "👑",
                    value: if app.is_premium() { "Premium" } else { "Бесплатный" },
                    color: "#2196F3",
                }
            }

            div { class: "text-center",
                h2 { class: "text-xl font-semibold mb-4", "VPN Подключение" }
                if servers.read().is_none() {
                    LoadingSpinner { text: "Загружаем серверы..." }
                } else {
                    ConnectButton {
                        connected,
                        connecting,
                        disabled: !connected && !has_target,
                        on_toggle,
                    }
                }
                if let Some(error) = error {
                    p { class: "mt-3 text-sm text-[#f44336]", "{error}" }
                }
            }

            ConnectionStatus { connected, server: current.read().clone(), elapsed: seconds }
        }
    }
}
