//! Fixed-interval refresh tied to the owning view's lifetime.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Recurring background refresh. The task is aborted on [`Poller::stop`] or
/// drop, so a torn-down view cannot keep issuing requests.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn start<F, Fut>(period: Duration, mut refresh: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the initial
            // fetch stays with the caller.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                refresh().await;
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
