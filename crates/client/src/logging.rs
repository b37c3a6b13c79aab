//! Cross-platform logging.
//!
//! The `log_*!` macros format their arguments and pass the message to
//! [`write`], which picks the backend for the current target:
//! `web_sys::console` in the browser, `tracing` everywhere else.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Emit one already-formatted message at `level`.
#[cfg(target_arch = "wasm32")]
pub fn write(level: Level, msg: &str) {
    let msg = wasm_bindgen::JsValue::from_str(msg);
    match level {
        Level::Debug => web_sys::console::debug_1(&msg),
        Level::Info => web_sys::console::log_1(&msg),
        Level::Warn => web_sys::console::warn_1(&msg),
        Level::Error => web_sys::console::error_1(&msg),
    }
}

/// Emit one already-formatted message at `level`.
#[cfg(not(target_arch = "wasm32"))]
pub fn write(level: Level, msg: &str) {
    match level {
        Level::Debug => tracing::debug!(target: "matreshka_client", "{}", msg),
        Level::Info => tracing::info!(target: "matreshka_client", "{}", msg),
        Level::Warn => tracing::warn!(target: "matreshka_client", "{}", msg),
        Level::Error => tracing::error!(target: "matreshka_client", "{}", msg),
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $($arg:tt)*) => {
        $crate::logging::write($crate::logging::Level::$level, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log_at!(Info, $($arg)*) };
}

/// Failures surfaced to the user also land here.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log_at!(Error, $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log_at!(Warn, $($arg)*) };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log_at!(Debug, $($arg)*) };
}
