use dioxus::prelude::*;

/// Big round connect/disconnect toggle.
#[component]
pub fn ConnectButton(
    connected: bool,
    connecting: bool,
    #[props(default)] disabled: bool,
    on_toggle: EventHandler<()>,
) -> Element {
    let (label, icon, ring) = if connecting {
        ("Подключение...", "⏳", "from-[#FFD700] to-[#B8860B]")
    } else if connected {
        ("Отключить VPN", "🛡️", "from-[#4CAF50] to-[#2E7D32]")
    } else {
        ("Подключить VPN", "🪆", "from-[#DC143C] to-[#8B0000]")
    };
    let inactive = connecting || disabled;

    rsx! {
        button {
            class: "mx-auto w-40 h-40 rounded-full flex flex-col items-center justify-center gap-2 text-white font-semibold bg-gradient-to-br {ring} border-4 border-[#FFD700]/40 shadow-xl transition-transform disabled:opacity-60",
            disabled: inactive,
            onclick: move |_| {
                if !inactive {
                    on_toggle.call(());
                }
            },
            span { class: "text-4xl", "{icon}" }
            span { class: "text-sm whitespace-pre-line", "{label}" }
        }
    }
}
