//! Request-tracked access to the VPN API from components.

use std::rc::Rc;

use dioxus::prelude::*;
use matreshka_shared::{
    ApiError, AuthResponse, Identity, Plan, ServerList, SubscribeResponse, UserStats,
};

use crate::api_client::{ApiClient, VpnApi};
use crate::request_state::{CallState, Operation, RequestStates, RequestTracker, StateSink};
use crate::session::SessionController;

impl StateSink for Signal<RequestStates> {
    fn update(&mut self, op: Operation, apply: impl FnOnce(&mut CallState)) {
        // The owning component may be gone by the time a call settles.
        if let Ok(mut states) = self.try_write() {
            apply(states.slot_mut(op));
        }
    }
}

pub type UiSession = SessionController<ApiClient, Signal<RequestStates>>;

/// API facade plus the per-operation loading/error slots of one component.
#[derive(Clone)]
pub struct ApiHandle {
    client: Rc<ApiClient>,
    tracker: RequestTracker<Signal<RequestStates>>,
    states: Signal<RequestStates>,
}

pub fn use_api() -> ApiHandle {
    let client = use_context::<Rc<ApiClient>>();
    let states = use_signal(RequestStates::default);
    ApiHandle {
        client,
        tracker: RequestTracker::new(states),
        states,
    }
}

impl ApiHandle {
    pub fn states(&self) -> Signal<RequestStates> {
        self.states
    }

    pub fn is_loading(&self, op: Operation) -> bool {
        self.states.read().is_loading(op)
    }

    pub fn error(&self, op: Operation) -> Option<String> {
        self.states.read().error(op).map(str::to_owned)
    }

    pub fn clear_error(&self, op: Operation) {
        let mut states = self.states;
        states.write().clear_error(op);
    }

    /// Connection session bound to this component's request slots.
    pub fn session(&self, telegram_id: i64) -> UiSession {
        SessionController::new(self.client.clone(), telegram_id, self.tracker.clone())
    }

    pub async fn authenticate(&self, identity: &Identity) -> Option<AuthResponse> {
        self.tracker
            .run(Operation::Authenticate, self.client.authenticate(identity))
            .await
    }

    pub async fn list_servers(&self) -> Option<ServerList> {
        self.tracker
            .run(Operation::ListServers, self.client.list_servers())
            .await
    }

    pub async fn subscribe(&self, telegram_id: i64, plan: Plan) -> Option<SubscribeResponse> {
        self.tracker
            .run(Operation::Subscribe, async {
                let resp = self.client.subscribe(telegram_id, plan).await?;
                if resp.success {
                    Ok(resp)
                } else {
                    Err(ApiError::Rejected(resp.message))
                }
            })
            .await
    }

    pub async fn user_stats(&self, telegram_id: i64) -> Option<UserStats> {
        self.tracker
            .run(Operation::FetchStats, self.client.user_stats(telegram_id))
            .await
    }
}
