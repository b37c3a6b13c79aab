use dioxus::prelude::*;
use matreshka_shared::Server;

use crate::format;

#[component]
pub fn ConnectionStatus(connected: bool, server: Option<Server>, elapsed: u64) -> Element {
    let server_label = server
        .as_ref()
        .map(|s| format!("{} {}", s.flag, s.name))
        .unwrap_or_else(|| "Не выбран".to_string());
    let badge = if connected { "Подключено" } else { "Отключено" };
    let dot = if connected { "bg-[#4CAF50]" } else { "bg-[#f44336]" };
    let protocol = if connected { "WireGuard" } else { "Не активен" };
    let protection = if connected {
        "🛡️ Ваше соединение надежно защищено"
    } else {
        "⚠️ Соединение не защищено. Подключитесь к VPN"
    };

    rsx! {
        div { class: "rounded-2xl p-5 bg-gradient-to-br from-[#16213e] to-[#0f3460] border border-[#FFD700]/20",
            div { class: "flex items-center justify-between mb-4",
                div { class: "flex items-center gap-2 text-white font-semibold",
                    span { "🪆" }
                    "Статус соединения"
                }
                div { class: "flex items-center gap-2 text-xs text-white",
                    span { class: "w-2 h-2 rounded-full {dot}" }
                    "{badge}"
                }
            }
            div { class: "space-y-2 text-sm",
                StatusRow { label: "🌍 Сервер", value: server_label }
                if let Some(server) = server.as_ref() {
                    StatusRow { label: "📍 Локация", value: server.location() }
                }
                StatusRow { label: "⏱️ Время соединения", value: format::clock(elapsed) }
                StatusRow { label: "🔒 Протокол", value: protocol }
            }
            p { class: "mt-4 text-xs text-center text-[#FFD700]", "{protection}" }
        }
    }
}

#[component]
fn StatusRow(#[props(into)] label: String, #[props(into)] value: String) -> Element {
    rsx! {
        div { class: "flex justify-between",
            span { class: "text-[#b0b8c5]", "{label}" }
            span { class: "text-white font-medium", "{value}" }
        }
    }
}
