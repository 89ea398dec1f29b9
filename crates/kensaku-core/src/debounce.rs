//! Cancellable delayed execution on the tokio runtime.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// One delayed job. Dropping the handle cancels the job if it has not run.
#[derive(Debug)]
pub struct PendingTimer {
    handle: JoinHandle<()>,
}

impl PendingTimer {
    /// Run `job` after `delay` on the current tokio runtime.
    pub fn spawn<F>(delay: Duration, job: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job.await;
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PendingTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Holds at most one [`PendingTimer`]; scheduling a new one cancels the old.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<PendingTimer>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&mut self, delay: Duration, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Cancel before arming so two timers never coexist.
        self.cancel();
        self.pending = Some(PendingTimer::spawn(delay, job));
    }

    pub fn cancel(&mut self) {
        self.pending.take();
    }

    /// Whether a timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_finished())
    }
}
