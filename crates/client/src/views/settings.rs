use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant};
use crate::hooks::{use_app_state, use_host};
use crate::host::{HapticStyle, HostContext};
use crate::settings::Toggle;

#[component]
pub fn SettingsPage() -> Element {
    let host = use_host();
    let mut app = use_app_state();

    let on_close = {
        let host = host.clone();
        move |_| {
            let host = host.clone();
            spawn(async move {
                if host.confirm("Закрыть MatreshkaVPN?").await {
                    host.close();
                }
            });
        }
    };

    let settings = app.settings.read().clone();
    let (environment, identity) = match host.context() {
        Some(HostContext::Telegram(session)) => ("Telegram", session.user.clone()),
        Some(HostContext::Standalone(identity)) => ("Браузер (тестовый пользователь)", Some(identity.clone())),
        None => ("Не инициализировано", None),
    };
    let theme = if host.is_dark() { "Тёмная" } else { "Светлая" };

    rsx! {
        div {
            h1 { class: "text-2xl font-semibold text-center mb-6", "Настройки" }

            div { class: "rounded-2xl p-5 mb-5 bg-gradient-to-br from-[#16213e] to-[#0f3460] border border-[#FFD700]/20 space-y-4",
                for toggle in Toggle::ALL {
                    label { key: "{toggle.label()}", class: "flex items-center justify-between gap-4",
                        div {
                            div { class: "text-white font-medium", "{toggle.label()}" }
                            div { class: "text-xs text-[#b0b8c5]", "{toggle.hint()}" }
                        }
                        input {
                            r#type: "checkbox",
                            class: "w-5 h-5 accent-[#DC143C]",
                            checked: settings.get(toggle),
                            onchange: {
                                let host = host.clone();
                                move |_| {
                                    let enabled = app.settings.with_mut(|s| s.toggle(toggle));
                                    if toggle == Toggle::Haptics && enabled {
                                        host.haptic(HapticStyle::Light);
                                    }
                                }
                            },
                        }
                    }
                }
            }

            div { class: "rounded-2xl p-5 mb-5 bg-white/5 border border-white/10 text-sm space-y-2",
                div { class: "flex justify-between",
                    span { class: "text-[#b0b8c5]", "Среда" }
                    span { class: "text-white", "{environment}" }
                }
                div { class: "flex justify-between",
                    span { class: "text-[#b0b8c5]", "Тема" }
                    span { class: "text-white", "{theme}" }
                }
                if let Some(identity) = identity {
                    div { class: "flex justify-between",
                        span { class: "text-[#b0b8c5]", "Пользователь" }
                        span { class: "text-white", "{identity.display_name()}" }
                    }
                    if let Some(username) = identity.username {
                        div { class: "flex justify-between",
                            span { class: "text-[#b0b8c5]", "Имя пользователя" }
                            span { class: "text-white", "@{username}" }
                        }
                    }
                }
                div { class: "flex justify-between",
                    span { class: "text-[#b0b8c5]", "Подписка" }
                    span { class: "text-[#FFD700]", if app.is_premium() { "Premium 👑" } else { "Бесплатная" } }
                }
            }

            if host.is_embedded() {
                Button {
                    variant: ButtonVariant::Secondary,
                    class: "w-full",
                    onclick: on_close,
                    "Закрыть приложение"
                }
            }
        }
    }
}
