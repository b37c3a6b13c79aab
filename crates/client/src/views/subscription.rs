//! Premium plans and checkout.

use dioxus::prelude::*;
use matreshka_shared::{AccountInfo, Plan};

use crate::components::ui::{Button, ButtonVariant};
use crate::format;
use crate::hooks::{use_api, use_app_state, use_host};
use crate::host::HapticStyle;
use crate::request_state::Operation;

#[component]
pub fn SubscriptionPage() -> Element {
    let host = use_host();
    let api = use_api();
    let mut app = use_app_state();
    let mut chosen = use_signal(|| Plan::Yearly);

    let checkout = {
        let host = host.clone();
        let api = api.clone();
        move || {
            let Some(telegram_id) = host.identity().map(|u| u.id) else {
                host.alert("Не удалось определить пользователя Telegram");
                return;
            };
            let plan = *chosen.read();
            let host = host.clone();
            let api = api.clone();
            spawn(async move {
                let question = format!("Оформить подписку «{}» за {}₽?", plan.label(), plan.price_rub());
                if !host.confirm(&question).await {
                    return;
                }
                match api.subscribe(telegram_id, plan).await {
                    Some(resp) => {
                        host.haptic(HapticStyle::Success);
                        let until = resp.subscription_until.clone();
                        app.account.with_mut(|account| {
                            let account = account.get_or_insert_with(|| AccountInfo {
                                telegram_id,
                                username: None,
                                first_name: None,
                                last_name: None,
                                is_premium: true,
                                subscription_until: None,
                            });
                            account.is_premium = true;
                            account.subscription_until = until.clone();
                        });
                        let message = match until {
                            Some(until) => format!("Premium активирован до {}", format::date(&until)),
                            None => resp.message,
                        };
                        host.alert(&message);
                    }
                    None => host.haptic(HapticStyle::Error),
                }
            });
        }
    };

    // Host main button mirrors the checkout button inside Telegram
    use_effect({
        let host = host.clone();
        let checkout = checkout.clone();
        move || {
            let plan = *chosen.read();
            let checkout = checkout.clone();
            host.show_main_button(&format!("Оформить за {}₽", plan.price_rub()), move || checkout());
        }
    });
    use_drop({
        let host = host.clone();
        move || host.hide_main_button()
    });

    let (saved, percent) = Plan::yearly_savings();
    let processing = api.is_loading(Operation::Subscribe);
    let error = api.error(Operation::Subscribe);
    let account = app.account.read().clone();
    let active_until = account
        .as_ref()
        .filter(|a| a.is_premium)
        .map(|a| a.subscription_until.as_deref().map(format::date).unwrap_or_default());

    rsx! {
        div {
            h1 { class: "text-2xl font-semibold text-center mb-1", "Premium подписка" }
            p { class: "text-sm text-center text-[#FFD700] opacity-80 mb-6", "Все серверы без ограничений" }

            if let Some(until) = active_until {
                div { class: "rounded-2xl p-4 mb-5 text-center bg-[#4CAF50]/15 border border-[#4CAF50]/40",
                    div { class: "text-3xl mb-1", "👑" }
                    p { class: "text-sm text-white", "Premium активен" }
                    if !until.is_empty() {
                        p { class: "text-xs text-[#b0b8c5]", "до {until}" }
                    }
                }
            }

            div { class: "space-y-3 mb-5",
                for plan in Plan::ALL {
                    button {
                        key: "{plan}",
                        class: if *chosen.read() == plan { "w-full rounded-2xl p-4 flex justify-between items-center bg-gradient-to-br from-[#DC143C] to-[#8B0000] border-2 border-[#FFD700]" } else { "w-full rounded-2xl p-4 flex justify-between items-center bg-white/5 border-2 border-white/10" },
                        onclick: move |_| chosen.set(plan),
                        div { class: "text-left",
                            div { class: "font-semibold text-white", "{plan.label()}" }
                            if plan == Plan::Yearly {
                                div { class: "text-xs text-[#4CAF50]", "Экономия {saved}₽ ({percent}%)" }
                            }
                        }
                        div { class: "text-xl font-bold text-[#FFD700]", "{plan.price_rub()}₽" }
                    }
                }
            }

            Button {
                variant: ButtonVariant::Premium,
                class: "w-full",
                disabled: processing,
                onclick: move |_| checkout(),
                if processing {
                    "⏳ Обработка..."
                } else {
                    "Получить Premium 👑"
                }
            }

            if let Some(error) = error {
                p { class: "mt-3 text-sm text-center text-[#f44336]", "{error}" }
            }
        }
    }
}
