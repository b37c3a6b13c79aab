//! App-wide context: host bridge, API client and shared screen state.

use std::rc::Rc;

use dioxus::prelude::*;
use matreshka_shared::{AccountInfo, Server};

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::host::HostBridge;
use crate::settings::Settings;

/// State shared between screens.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Account as last confirmed by the backend.
    pub account: Signal<Option<AccountInfo>>,
    /// Server picked on the servers screen, or the default pick.
    pub selected_server: Signal<Option<Server>>,
    pub settings: Signal<Settings>,
}

impl AppState {
    pub fn is_premium(&self) -> bool {
        self.account.read().as_ref().is_some_and(|a| a.is_premium)
    }
}

/// Activates the host bridge and provides the app context to its children.
#[component]
pub fn AppProvider(children: Element) -> Element {
    let host = use_context_provider(|| {
        let mut bridge = HostBridge::detect();
        bridge.activate();
        bridge
    });

    use_context_provider(|| Rc::new(ApiClient::new(&ClientConfig::from_build_env())));

    let state = use_context_provider(|| AppState {
        account: Signal::new(None),
        selected_server: Signal::new(None),
        settings: Signal::new(Settings::default()),
    });

    // Settings toggles that the bridge honors (haptics)
    use_effect(move || {
        state.settings.read().apply_to(&host);
    });

    children
}

pub fn use_host() -> HostBridge {
    use_context::<HostBridge>()
}

pub fn use_app_state() -> AppState {
    use_context::<AppState>()
}
