use dioxus::prelude::*;

#[component]
pub fn Header(user_name: Option<String>, premium: bool) -> Element {
    rsx! {
        header { class: "flex items-center justify-between px-5 py-4 bg-gradient-to-r from-[#8B0000] to-[#DC143C] border-b border-[#FFD700]/20",
            div { class: "flex items-center gap-2",
                span { class: "text-3xl matreshka-float", "🪆" }
                span { class: "text-lg font-bold text-white", "MatreshkaVPN" }
            }
            div { class: "flex items-center gap-2 text-sm text-[#FFD700]",
                if premium {
                    span { "👑" }
                }
                if let Some(name) = user_name {
                    span { "{name}" }
                }
            }
        }
    }
}
