use dioxus::prelude::*;

/// Small tile with an icon, a title and one highlighted value.
#[component]
pub fn StatCard(
    #[props(into)] title: String,
    #[props(into)] icon: String,
    #[props(into)] value: String,
    #[props(default = "#FFD700".to_string(), into)] color: String,
    #[props(optional, into)] subtitle: Option<String>,
) -> Element {
    rsx! {
        div { class: "rounded-2xl p-4 bg-gradient-to-br from-[#16213e] to-[#0f3460] border border-[#FFD700]/20 text-center",
            div { class: "text-2xl mb-1", "{icon}" }
            div { class: "text-xs uppercase tracking-wide text-[#b0b8c5]", "{title}" }
            div { class: "text-lg font-semibold mt-1", style: "color: {color}", "{value}" }
            if let Some(subtitle) = subtitle {
                div { class: "text-xs text-[#b0b8c5] mt-1", "{subtitle}" }
            }
        }
    }
}
