//! Generic dialogs used when no host is embedding the app.

#[cfg(target_arch = "wasm32")]
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn alert(message: &str) {
    crate::log_warn!("[alert] {}", message);
}

/// There is no one to ask on native; treat it as declined.
#[cfg(not(target_arch = "wasm32"))]
pub fn confirm(message: &str) -> bool {
    crate::log_warn!("[confirm] {} (declined: no dialog available)", message);
    false
}
