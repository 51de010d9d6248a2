/*
[INPUT]:  Fetch closures, reconcile policies and a polling interval
[OUTPUT]: Cancellable background poll chains (PollHandle)
[POS]:    Sync layer - fetch/reconcile/sleep loop shared by every live pane
[UPDATE]: When changing cancellation or error-handling semantics
*/

use std::future::Future;
use std::time::Duration;

use interceptor_adapter::{InterceptorError, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Whether a poll chain schedules another cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollControl {
    Continue,
    Stop,
}

/// Merge policy applied to every fetched snapshot
///
/// `reconcile` runs on the polling task; implementors check their own
/// binding before touching any view state.
pub trait Reconcile<T>: Send + 'static {
    fn reconcile(&mut self, fetched: T) -> PollControl;

    /// A failed fetch is logged by the poller; the chain continues unless this says otherwise
    fn on_error(&mut self, _error: &InterceptorError) -> PollControl {
        PollControl::Continue
    }
}

/// Owner of a running poll chain
///
/// Dropping the handle cancels the chain. A fetch already in flight when
/// cancellation happens resolves into nothing.
#[derive(Debug)]
pub struct PollHandle {
    label: String,
    token: CancellationToken,
    task: JoinHandle<()>,
    cancel_on_drop: bool,
}

impl PollHandle {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Stop scheduling further cycles; safe to call any number of times
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!(poller = %self.label, "cancelling poll chain");
            self.token.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the chain has stopped on its own or after cancellation
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Token that is cancelled together with this chain
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Let the chain outlive this handle; it still ends on its own or with its token
    pub fn detach(mut self) {
        self.cancel_on_drop = false;
    }

    /// Wait for the chain to end
    pub async fn join(&mut self) {
        if let Err(err) = (&mut self.task).await {
            warn!(poller = %self.label, error = %err, "poll task ended abnormally");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if self.cancel_on_drop {
            self.token.cancel();
        }
    }
}

/// Spawns poll chains on the current tokio runtime
pub struct Poller;

impl Poller {
    /// Run fetch then reconcile, then sleep `interval`, until stopped or cancelled
    pub fn start<T, F, Fut, R>(
        label: impl Into<String>,
        interval: Duration,
        fetch: F,
        reconciler: R,
    ) -> PollHandle
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        R: Reconcile<T>,
    {
        Self::spawn(label.into(), Some(interval), CancellationToken::new(), fetch, reconciler)
    }

    /// Single fetch/reconcile cycle with the same cancellation rules as `start`
    pub fn once<T, F, Fut, R>(label: impl Into<String>, fetch: F, reconciler: R) -> PollHandle
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        R: Reconcile<T>,
    {
        Self::spawn(label.into(), None, CancellationToken::new(), fetch, reconciler)
    }

    /// Single cycle bound to an existing token, e.g. a parent chain's child token
    pub fn once_with_token<T, F, Fut, R>(
        label: impl Into<String>,
        token: CancellationToken,
        fetch: F,
        reconciler: R,
    ) -> PollHandle
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        R: Reconcile<T>,
    {
        Self::spawn(label.into(), None, token, fetch, reconciler)
    }

    fn spawn<T, F, Fut, R>(
        label: String,
        interval: Option<Duration>,
        token: CancellationToken,
        fetch: F,
        reconciler: R,
    ) -> PollHandle
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        R: Reconcile<T>,
    {
        debug!(poller = %label, ?interval, "starting poll chain");
        let task = tokio::spawn(run_cycles(
            label.clone(),
            interval,
            token.clone(),
            fetch,
            reconciler,
        ));
        PollHandle {
            label,
            token,
            task,
            cancel_on_drop: true,
        }
    }
}

async fn run_cycles<T, F, Fut, R>(
    label: String,
    interval: Option<Duration>,
    token: CancellationToken,
    mut fetch: F,
    mut reconciler: R,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    R: Reconcile<T>,
{
    let mut cycle: u64 = 0;
    loop {
        cycle += 1;
        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = fetch() => result,
        };

        // Cancelled while the response was being decoded
        if token.is_cancelled() {
            debug!(poller = %label, cycle, "discarding response of cancelled chain");
            break;
        }

        let control = match fetched {
            Ok(value) => reconciler.reconcile(value),
            Err(err) => {
                warn!(
                    poller = %label,
                    cycle,
                    error = %err,
                    retryable = err.is_retryable(),
                    "poll cycle failed"
                );
                reconciler.on_error(&err)
            }
        };

        if control == PollControl::Stop {
            debug!(poller = %label, cycle, "poll chain stopped");
            break;
        }

        let Some(interval) = interval else {
            break;
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
