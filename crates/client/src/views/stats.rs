use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant, LoadingSpinner, StatCard};
use crate::format;
use crate::hooks::{use_api, use_host};
use crate::request_state::Operation;

/// Usage statistics of the current user.
#[component]
pub fn StatsPage() -> Element {
    let host = use_host();
    let api = use_api();
    let telegram_id = host.identity().map(|u| u.id);

    let mut stats = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                match telegram_id {
                    Some(id) => api.user_stats(id).await,
                    None => None,
                }
            }
        }
    });

    let error = api.error(Operation::FetchStats);

    rsx! {
        div {
            h1 { class: "text-2xl font-semibold text-center mb-1", "Статистика" }
            p { class: "text-sm text-center text-[#FFD700] opacity-80 mb-6", "Ваша активность в MatreshkaVPN" }

            match stats.read().as_ref() {
                None => rsx! { LoadingSpinner { text: "Загружаем статистику..." } },
                Some(None) => rsx! {
                    div { class: "rounded-2xl p-8 text-center bg-white/5 border border-white/10",
                        div { class: "text-5xl mb-3", "📊" }
                        p { class: "text-[#b0b8c5] mb-4",
                            {error.unwrap_or_else(|| "Статистика недоступна".to_string())}
                        }
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| stats.restart(),
                            "Повторить"
                        }
                    }
                },
                Some(Some(stats)) => rsx! {
                    if let Some(achievement) = stats.achievement() {
                        div { class: "rounded-2xl p-4 mb-5 flex items-center gap-3 bg-gradient-to-br from-[#FFD700]/20 to-[#B8860B]/10 border border-[#FFD700]/40",
                            span { class: "text-3xl", "{achievement.icon()}" }
                            span { class: "text-sm font-semibold text-[#FFD700]", "{achievement.title()}" }
                        }
                    }

                    div { class: "grid grid-cols-2 gap-4 mb-6",
                        StatCard {
                            title: "Подключений",
                            icon: "🔗",
                            value: stats.total_connections.to_string(),
                            color: "#4CAF50",
                            subtitle: "всего",
                        }
                        StatCard {
                            title: "Время онлайн",
                            icon: "⏱️",
                            value: format::duration(stats.total_time),
                            color: "#2196F3",
                            subtitle: "общее время",
                        }
                        StatCard {
                            title: "Серверов",
                            icon: "🌍",
                            value: stats.servers_used.to_string(),
                            color: "#FF9800",
                            subtitle: "использовано",
                        }
                        StatCard {
                            title: "Средняя сессия",
                            icon: "📈",
                            value: format::duration(stats.average_session()),
                            color: "#9C27B0",
                            subtitle: "длительность",
                        }
                    }

                    div { class: "rounded-2xl p-5 bg-gradient-to-br from-[#16213e] to-[#0f3460] border border-[#FFD700]/20",
                        h3 { class: "font-semibold mb-3", "🕒 Последние подключения" }
                        if stats.recent_connections.is_empty() {
                            p { class: "text-sm text-center text-[#b0b8c5] py-4",
                                "Подключений пока нет."
                                br {}
                                "Попробуйте подключиться к серверу!"
                            }
                        } else {
                            div { class: "space-y-3",
                                for (index, connection) in stats.recent_connections.iter().enumerate() {
                                    div { key: "{index}", class: "rounded-xl p-3 bg-white/5",
                                        div { class: "flex justify-between text-sm",
                                            span { class: "text-white font-medium", "{connection.server_name}" }
                                            span { class: "text-[#FFD700]", "{format::duration(connection.duration)}" }
                                        }
                                        div { class: "flex justify-between text-xs text-[#b0b8c5] mt-1",
                                            span { "{connection.country}" }
                                            span { "{format::date(&connection.connected_at)}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
