use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(#[props(default = "Загрузка...".to_string(), into)] text: String) -> Element {
    rsx! {
        div { class: "flex flex-col items-center justify-center py-12 text-[#FFD700]",
            div { class: "text-5xl matreshka-float glow-gold", "🪆" }
            p { class: "mt-4 text-sm text-[#b0b8c5]", "{text}" }
        }
    }
}
