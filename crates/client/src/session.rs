//! Connection session: which server is current and for how long.
//!
//! `SessionState` makes "connected without a server" unrepresentable. The
//! elapsed timer lives exactly as long as a `Connected` state.

use std::cell::RefCell;
use std::rc::Rc;

use matreshka_shared::{ApiError, Server};

use crate::api_client::VpnApi;
use crate::request_state::{Operation, RequestTracker, StateSink};
use crate::ticker::{ElapsedTicker, TickCallback};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected { server: Server },
}

/// Local connection state plus the elapsed-time ticker.
#[derive(Default)]
pub struct ConnectionSession {
    state: SessionState,
    ticker: Option<ElapsedTicker>,
    on_tick: Option<TickCallback>,
}

impl ConnectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every elapsed change, including the reset to zero on each
    /// transition.
    pub fn with_tick_callback(mut self, on_tick: TickCallback) -> Self {
        self.on_tick = Some(on_tick);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected { .. })
    }

    pub fn current_server(&self) -> Option<&Server> {
        match &self.state {
            SessionState::Connected { server } => Some(server),
            SessionState::Disconnected => None,
        }
    }

    /// Seconds since the last transition into `Connected`; zero otherwise.
    pub fn elapsed(&self) -> u64 {
        match (&self.state, &self.ticker) {
            (SessionState::Connected { .. }, Some(ticker)) => ticker.elapsed(),
            _ => 0,
        }
    }

    pub fn timer_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(ElapsedTicker::is_running)
    }

    /// Record a confirmed connection. Restarts the timer from zero.
    pub fn mark_connected(&mut self, server: Server) {
        self.stop_timer();
        self.state = SessionState::Connected { server };
        self.ticker = Some(ElapsedTicker::start(self.on_tick.clone()));
        self.notify(0);
    }

    /// Record a disconnection. The timer is stopped before this returns.
    pub fn mark_disconnected(&mut self) {
        self.reset(true);
    }

    /// Drop the connection silently. The tick callback is not called, so its
    /// target may already be gone.
    pub fn clear(&mut self) {
        self.reset(false);
    }

    fn reset(&mut self, notify: bool) {
        self.stop_timer();
        self.state = SessionState::Disconnected;
        if notify {
            self.notify(0);
        }
    }

    fn stop_timer(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    fn notify(&self, elapsed: u64) {
        if let Some(callback) = &self.on_tick {
            callback(elapsed);
        }
    }
}

impl std::fmt::Debug for ConnectionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSession")
            .field("state", &self.state)
            .field("elapsed", &self.elapsed())
            .field("timer_running", &self.timer_running())
            .finish()
    }
}

/// Drives a [`ConnectionSession`] through the remote connect/disconnect calls.
///
/// The session only changes after the server confirms the call.
pub struct SessionController<A: VpnApi, S: StateSink> {
    api: Rc<A>,
    telegram_id: i64,
    tracker: RequestTracker<S>,
    session: RefCell<ConnectionSession>,
}

impl<A: VpnApi + 'static, S: StateSink> SessionController<A, S> {
    pub fn new(api: Rc<A>, telegram_id: i64, tracker: RequestTracker<S>) -> Self {
        Self {
            api,
            telegram_id,
            tracker,
            session: RefCell::new(ConnectionSession::new()),
        }
    }

    pub fn with_session(self, session: ConnectionSession) -> Self {
        self.session.replace(session);
        self
    }

    /// Connect to `server`, switching away from the current one if needed.
    ///
    /// Returns whether the session is now connected to `server`.
    pub async fn connect(&self, server: Server) -> bool {
        if self.current_server().is_some_and(|s| s.id == server.id) {
            return true;
        }

        let api = self.api.clone();
        let telegram_id = self.telegram_id;
        let server_id = server.id.clone();
        let reply = self
            .tracker
            .run(Operation::Connect, async move {
                let resp = api.connect(telegram_id, &server_id).await?;
                if resp.success {
                    Ok(resp)
                } else {
                    Err(ApiError::Rejected(resp.message))
                }
            })
            .await;

        match reply {
            Some(_) => {
                crate::log_info!("Connected to {} ({})", server.name, server.id);
                self.session.borrow_mut().mark_connected(server);
                true
            }
            None => false,
        }
    }

    /// Disconnect from the current server.
    ///
    /// A failed call leaves the session connected, since the server still
    /// holds the connection open. Returns whether the session is now
    /// disconnected.
    pub async fn disconnect(&self) -> bool {
        if !self.is_connected() {
            return true;
        }

        let api = self.api.clone();
        let telegram_id = self.telegram_id;
        let reply = self
            .tracker
            .run(Operation::Disconnect, async move {
                let resp = api.disconnect(telegram_id).await?;
                if resp.success {
                    Ok(resp)
                } else {
                    Err(ApiError::Rejected(resp.message))
                }
            })
            .await;

        match reply {
            Some(_) => {
                crate::log_info!("Disconnected after {}s", self.elapsed());
                self.session.borrow_mut().mark_disconnected();
                true
            }
            None => false,
        }
    }

    /// Drop local connection state without a remote call (view teardown).
    pub fn teardown(&self) {
        self.session.borrow_mut().clear();
    }

    pub fn is_connected(&self) -> bool {
        self.session.borrow().is_connected()
    }

    pub fn current_server(&self) -> Option<Server> {
        self.session.borrow().current_server().cloned()
    }

    pub fn elapsed(&self) -> u64 {
        self.session.borrow().elapsed()
    }

    pub fn timer_running(&self) -> bool {
        self.session.borrow().timer_running()
    }

    pub fn tracker(&self) -> &RequestTracker<S> {
        &self.tracker
    }
}
