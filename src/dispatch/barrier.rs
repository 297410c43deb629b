use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct BarrierState {
    outstanding: AtomicU64,
    completed: AtomicU64,
    notify: Notify,
}

/// Counter of outstanding sends gating the end of a run.
///
/// Every line that will produce a network call takes a [`CompletionGuard`];
/// dropping the guard (after success, failure, or an abandoned send) marks
/// the send complete.
#[derive(Debug, Clone, Default)]
pub struct CompletionBarrier {
    state: Arc<BarrierState>,
}

impl CompletionBarrier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn enter(&self) -> CompletionGuard {
        self.state.outstanding.fetch_add(1, Ordering::SeqCst);
        CompletionGuard {
            state: Arc::clone(&self.state),
        }
    }

    #[must_use]
    pub fn outstanding(&self) -> u64 {
        self.state.outstanding.load(Ordering::SeqCst)
    }

    /// Sends resolved so far, successful or not.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.state.completed.load(Ordering::SeqCst)
    }

    /// Waits until no send is outstanding.
    pub async fn wait(&self) {
        loop {
            let mut notified = pin!(self.state.notify.notified());
            notified.as_mut().enable();
            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Debug)]
pub struct CompletionGuard {
    state: Arc<BarrierState>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.state.completed.fetch_add(1, Ordering::SeqCst);
        let previous = self.state.outstanding.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |current| current.checked_sub(1),
        );
        if previous == Ok(1) {
            self.state.notify.notify_waiters();
        }
    }
}
