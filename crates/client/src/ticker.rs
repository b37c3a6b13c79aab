//! One-second elapsed-time counter for an open connection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{abortable, AbortHandle};

use crate::runtime;

/// Interval between two increments.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Callback fired with the new elapsed value after every tick.
#[cfg(not(target_arch = "wasm32"))]
pub type TickCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Callback fired with the new elapsed value after every tick.
#[cfg(target_arch = "wasm32")]
pub type TickCallback = std::rc::Rc<dyn Fn(u64)>;

/// Wrap a closure as a [`TickCallback`] for the current platform.
pub fn tick_callback(f: impl Fn(u64) + Send + Sync + 'static) -> TickCallback {
    #[cfg(not(target_arch = "wasm32"))]
    return Arc::new(f);
    #[cfg(target_arch = "wasm32")]
    return std::rc::Rc::new(f);
}

/// A running timer counting whole seconds from zero.
///
/// The background task is cancelled by [`ElapsedTicker::stop`] or when the
/// ticker is dropped, whichever comes first.
#[derive(Debug)]
pub struct ElapsedTicker {
    elapsed: Arc<AtomicU64>,
    abort: AbortHandle,
}

impl ElapsedTicker {
    /// Start counting from zero. Must be called inside the platform runtime.
    pub fn start(on_tick: Option<TickCallback>) -> Self {
        let elapsed = Arc::new(AtomicU64::new(0));
        let counter = elapsed.clone();

        let (ticks, abort) = abortable(async move {
            loop {
                runtime::sleep(TICK_PERIOD).await;
                let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(callback) = &on_tick {
                    callback(now);
                }
            }
        });
        runtime::spawn(async move {
            let _ = ticks.await;
        });

        Self { elapsed, abort }
    }

    /// Seconds counted so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.abort.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.abort.is_aborted()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (TickCallback, Arc<Mutex<Vec<u64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: TickCallback = Arc::new(move |n| sink.lock().unwrap().push(n));
        (callback, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn counts_whole_seconds() {
        let (callback, seen) = recorder();
        let ticker = ElapsedTicker::start(Some(callback));
        assert_eq!(ticker.elapsed(), 0);

        tokio::time::sleep(Duration::from_millis(3500)).await;

        assert_eq!(ticker.elapsed(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_the_counter() {
        let (callback, seen) = recorder();
        let ticker = ElapsedTicker::start(Some(callback));
        tokio::time::sleep(Duration::from_millis(2500)).await;

        ticker.stop();
        assert!(!ticker.is_running());
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(ticker.elapsed(), 2);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_task() {
        let (callback, seen) = recorder();
        let ticker = ElapsedTicker::start(Some(callback));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        drop(ticker);
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }
}
