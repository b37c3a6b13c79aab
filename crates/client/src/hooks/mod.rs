//! Dioxus hooks: app-wide context and the request-tracked API handle.

pub mod app_context;
pub mod use_api;

pub use app_context::{use_app_state, use_host, AppProvider, AppState};
pub use use_api::{use_api, ApiHandle};
