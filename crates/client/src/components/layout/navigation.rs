use dioxus::prelude::*;

use crate::Route;

/// Bottom tab bar.
#[component]
pub fn Navigation() -> Element {
    let current = use_route::<Route>();
    let items = [
        (Route::DashboardPage {}, "🏠", "Главная"),
        (Route::ServersPage {}, "🌍", "Серверы"),
        (Route::SubscriptionPage {}, "⭐", "Premium"),
        (Route::StatsPage {}, "📊", "Статистика"),
        (Route::SettingsPage {}, "⚙️", "Настройки"),
    ];

    rsx! {
        nav { class: "fixed bottom-0 inset-x-0 z-[100] bg-gradient-to-b from-[#8B0000] to-[#DC143C] border-t border-[#FFD700]/20 px-3 pt-3 pb-5",
            div { class: "flex justify-around items-center",
                for (route, icon, label) in items {
                    Link {
                        key: "{label}",
                        to: route.clone(),
                        class: if route == current { "flex flex-col items-center text-[#FFD700]" } else { "flex flex-col items-center text-white/70" },
                        span { class: "text-xl", "{icon}" }
                        span { class: "text-[11px] mt-1", "{label}" }
                    }
                }
            }
        }
    }
}
