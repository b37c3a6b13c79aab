//! Loading/error bookkeeping around facade calls.
//!
//! Every facade operation owns its own slot, so an in-flight `ListServers`
//! cannot clobber the error of a failed `Connect`. Two overlapping calls of the
//! same operation still share one slot; the last one to settle wins.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use matreshka_shared::ApiError;

/// One of the six remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Authenticate,
    ListServers,
    Connect,
    Disconnect,
    Subscribe,
    FetchStats,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Authenticate,
        Operation::ListServers,
        Operation::Connect,
        Operation::Disconnect,
        Operation::Subscribe,
        Operation::FetchStats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Authenticate => "authenticate",
            Operation::ListServers => "list servers",
            Operation::Connect => "connect",
            Operation::Disconnect => "disconnect",
            Operation::Subscribe => "subscribe",
            Operation::FetchStats => "fetch stats",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loading flag and last error of one operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallState {
    pub loading: bool,
    pub error: Option<String>,
}

/// All per-operation slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStates {
    slots: HashMap<Operation, CallState>,
}

impl RequestStates {
    pub fn get(&self, op: Operation) -> CallState {
        self.slots.get(&op).cloned().unwrap_or_default()
    }

    pub fn is_loading(&self, op: Operation) -> bool {
        self.slots.get(&op).is_some_and(|s| s.loading)
    }

    pub fn any_loading(&self) -> bool {
        self.slots.values().any(|s| s.loading)
    }

    pub fn error(&self, op: Operation) -> Option<&str> {
        self.slots.get(&op).and_then(|s| s.error.as_deref())
    }

    pub fn clear_error(&mut self, op: Operation) {
        if let Some(slot) = self.slots.get_mut(&op) {
            slot.error = None;
        }
    }

    pub(crate) fn slot_mut(&mut self, op: Operation) -> &mut CallState {
        self.slots.entry(op).or_default()
    }
}

/// Somewhere the tracker can publish slot changes to.
///
/// Implemented by [`LocalStates`] and, with the `ui` feature, by a Dioxus
/// `Signal<RequestStates>` so components re-render on every change.
pub trait StateSink: Clone {
    fn update(&mut self, op: Operation, apply: impl FnOnce(&mut CallState));
}

/// Plain single-threaded store of request states.
#[derive(Debug, Clone, Default)]
pub struct LocalStates(Rc<RefCell<RequestStates>>);

impl LocalStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RequestStates {
        self.0.borrow().clone()
    }
}

impl StateSink for LocalStates {
    fn update(&mut self, op: Operation, apply: impl FnOnce(&mut CallState)) {
        apply(self.0.borrow_mut().slot_mut(op));
    }
}

/// Runs facade calls, keeping their slots current and logging failures.
#[derive(Debug, Clone)]
pub struct RequestTracker<S: StateSink> {
    sink: S,
}

impl<S: StateSink> RequestTracker<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Await `call` under `op`'s slot.
    ///
    /// Failures are logged, recorded as a user-facing message and turned into
    /// `None`. The loading flag is cleared when the call settles or when the
    /// returned future is dropped mid-flight.
    pub async fn run<T, F>(&self, op: Operation, call: F) -> Option<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let mut sink = self.sink.clone();
        sink.update(op, |slot| {
            slot.loading = true;
            slot.error = None;
        });
        let _guard = LoadingGuard {
            sink: sink.clone(),
            op,
        };

        match call.await {
            Ok(value) => Some(value),
            Err(e) => {
                crate::log_error!("API error during {}: {}", op, e);
                let message = e.user_message();
                sink.update(op, |slot| slot.error = Some(message));
                None
            }
        }
    }
}

struct LoadingGuard<S: StateSink> {
    sink: S,
    op: Operation,
}

impl<S: StateSink> Drop for LoadingGuard<S> {
    fn drop(&mut self) {
        self.sink.update(self.op, |slot| slot.loading = false);
    }
}
