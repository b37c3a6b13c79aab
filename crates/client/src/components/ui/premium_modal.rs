//! Upsell shown when a free user taps a premium server.

use dioxus::prelude::*;
use matreshka_shared::Plan;

const FEATURES: [(&str, &str); 4] = [
    ("🌍", "Все серверы по всему миру"),
    ("⚡", "Безлимитный трафик"),
    ("🚀", "Максимальная скорость"),
    ("🛡️", "Приоритетная поддержка"),
];

#[component]
pub fn PremiumModal(
    server_name: Option<String>,
    #[props(default)] processing: bool,
    on_close: EventHandler<()>,
    on_upgrade: EventHandler<()>,
) -> Element {
    let (saved, percent) = Plan::yearly_savings();

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-content relative p-6 w-full max-w-sm text-center slide-up",
                onclick: move |evt| evt.stop_propagation(),
                button {
                    class: "absolute top-3 right-3 text-[#b0b8c5] hover:text-white",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_close.call(());
                    },
                    "✕"
                }
                div { class: "text-5xl mb-2 glow-gold", "👑" }
                h2 { class: "text-xl font-bold text-white", "Премиум доступ" }
                p { class: "text-sm text-[#FFD700] mb-4", "Открой все возможности MatreshkaVPN" }
                p { class: "text-sm text-[#b0b8c5] mb-4",
                    if let Some(name) = server_name {
                        "Сервер «{name}» доступен только для Premium пользователей"
                    } else {
                        "Этот сервер доступен только для Premium пользователей"
                    }
                }
                ul { class: "text-left space-y-2 mb-4",
                    for (icon, text) in FEATURES {
                        li { class: "flex items-center gap-2 text-white text-sm",
                            span { "{icon}" }
                            span { "{text}" }
                        }
                    }
                }
                div { class: "rounded-xl bg-white/5 p-3 mb-4 space-y-1",
                    for plan in Plan::ALL {
                        div { class: "flex justify-between text-sm",
                            span { class: "text-[#b0b8c5]", "{plan.label()}:" }
                            span { class: "text-[#FFD700] font-semibold", "{plan.price_rub()}₽" }
                        }
                    }
                    div { class: "text-xs text-[#4CAF50]", "Экономия {saved}₽ ({percent}%)" }
                }
                div { class: "flex gap-3",
                    button {
                        class: "flex-1 rounded-xl py-3 bg-white/10 text-white",
                        onclick: move |_| on_close.call(()),
                        "Отмена"
                    }
                    button {
                        class: "flex-1 rounded-xl py-3 bg-gradient-to-br from-[#FFD700] to-[#B8860B] text-[#8B0000] font-semibold disabled:opacity-70",
                        disabled: processing,
                        onclick: move |_| on_upgrade.call(()),
                        if processing {
                            "⏳ Обработка..."
                        } else {
                            "Получить Premium 👑"
                        }
                    }
                }
            }
        }
    }
}
