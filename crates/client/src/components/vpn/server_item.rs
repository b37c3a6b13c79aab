use dioxus::prelude::*;
use matreshka_shared::{Grade, Server};

fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::Good => "#4CAF50",
        Grade::Fair => "#FFD700",
        Grade::Poor => "#f44336",
    }
}

/// One row of the server list.
#[component]
pub fn ServerItem(server: Server, selected: bool, locked: bool, on_select: EventHandler<String>) -> Element {
    let border = if selected {
        "border-[#FFD700]"
    } else {
        "border-white/10"
    };
    let load_color = grade_color(server.load_grade());
    let ping_color = grade_color(server.ping_grade());
    let id = server.id.clone();

    rsx! {
        button {
            class: "w-full flex items-center gap-3 rounded-xl p-3 bg-white/5 border {border} text-left",
            onclick: move |_| on_select.call(id.clone()),
            span { class: "text-2xl", "{server.flag}" }
            div { class: "flex-1",
                div { class: "flex items-center gap-2 text-white font-medium",
                    "{server.name}"
                    if server.is_recommended {
                        span { class: "text-[10px] px-2 rounded-full bg-[#4CAF50]/20 text-[#4CAF50]", "Рекомендуем" }
                    }
                    if locked {
                        span { "🔒" }
                    }
                }
                div { class: "text-xs text-[#b0b8c5]", "{server.location()}" }
            }
            div { class: "text-right text-xs",
                div { style: "color: {ping_color}", "{server.ping} мс" }
                div { style: "color: {load_color}", "{server.load}%" }
            }
            if selected {
                span { class: "text-[#FFD700]", "✓" }
            }
        }
    }
}
