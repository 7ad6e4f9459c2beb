//! Cancellable one-shot timeout on the tokio runtime.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Pending callback that fires once after a delay unless cancelled.
///
/// Dropping the handle cancels the callback.
#[derive(Debug)]
pub struct ScheduledReset {
    handle: JoinHandle<()>,
}

impl ScheduledReset {
    /// Schedules `callback` on `runtime` to run once after `delay`.
    pub fn after<F>(runtime: &Handle, delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self { handle }
    }

    /// Cancels the callback if it has not fired yet.
    pub fn cancel(self) {
        // Drop aborts.
    }
}

impl Drop for ScheduledReset {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
