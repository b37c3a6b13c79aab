//! MatreshkaVPN Client - Telegram Mini App
//!
//! The core (HTTP facade, request state, host bridge, connection session)
//! builds on every target. The Dioxus screens live behind the `ui` feature.

pub mod logging;

pub mod api_client;
pub mod catalog;
pub mod config;
pub mod format;
pub mod host;
pub mod request_state;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod ticker;

#[cfg(feature = "ui")]
pub mod components;
#[cfg(feature = "ui")]
pub mod hooks;
#[cfg(feature = "ui")]
pub mod routes;
#[cfg(feature = "ui")]
pub mod views;

pub use api_client::{ApiClient, RequestOptions, VpnApi};
pub use catalog::{Selection, ServerCatalog};
pub use config::ClientConfig;
pub use host::{HostBridge, HostContext};
pub use request_state::{LocalStates, Operation, RequestStates, RequestTracker, StateSink};
pub use session::{ConnectionSession, SessionController, SessionState};
pub use settings::Settings;

#[cfg(feature = "ui")]
pub use routes::Route;
