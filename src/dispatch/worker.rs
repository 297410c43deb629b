use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::command::Command;
use crate::config::DeliveryMode;
use crate::transport::Transport;

use super::barrier::CompletionGuard;
use super::send::deliver;
use super::stats::RunStats;

/// A command waiting in a user's inbox, holding its completion slot.
pub(super) struct Pending {
    pub(super) command: Command,
    pub(super) guard: CompletionGuard,
}

#[derive(Clone)]
pub(super) struct WorkerContext {
    pub(super) transport: Arc<dyn Transport>,
    pub(super) stats: Arc<RunStats>,
    pub(super) rate: Duration,
    pub(super) delivery: DeliveryMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Buffering,
    Releasing,
    Done,
}

/// Dispatcher-side handle of one simulated user.
pub(super) struct UserWorkerHandle {
    username: String,
    inbox: mpsc::UnboundedSender<Pending>,
    start: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl UserWorkerHandle {
    pub(super) fn spawn(username: String, context: WorkerContext) -> Self {
        let (inbox, inbox_rx) = mpsc::unbounded_channel();
        let (start, start_rx) = oneshot::channel();
        let task = tokio::spawn(run_user_worker(
            username.clone(),
            inbox_rx,
            start_rx,
            context,
        ));
        Self {
            username,
            inbox,
            start: Some(start),
            task,
        }
    }

    /// Appends a command to the user's inbox. A rejected command drops its
    /// guard, so it still counts as completed.
    pub(super) fn push(&self, command: Command, guard: CompletionGuard) {
        if self.inbox.send(Pending { command, guard }).is_err() {
            warn!("User worker {} is gone; dropping command.", self.username);
        }
    }

    /// Fires the single-use start signal.
    pub(super) fn release(&mut self) {
        let Some(start) = self.start.take() else {
            return;
        };
        if start.send(()).is_err() {
            warn!("User worker {} exited before release.", self.username);
        }
    }

    pub(super) fn into_task(self) -> JoinHandle<()> {
        self.task
    }
}

async fn run_user_worker(
    username: String,
    mut inbox: mpsc::UnboundedReceiver<Pending>,
    mut start: oneshot::Receiver<()>,
    context: WorkerContext,
) {
    let mut state = WorkerState::Buffering;
    let mut buffered: Vec<Pending> = Vec::new();
    let mut inbox_open = true;

    while state == WorkerState::Buffering {
        tokio::select! {
            biased;
            message = inbox.recv(), if inbox_open => match message {
                Some(pending) => buffered.push(pending),
                None => inbox_open = false,
            },
            signal = &mut start => {
                if signal.is_err() {
                    warn!(
                        "Start signal for {} was dropped; abandoning {} command(s).",
                        username,
                        buffered.len()
                    );
                    return;
                }
                state = WorkerState::Releasing;
            }
        }
    }

    while let Ok(pending) = inbox.try_recv() {
        buffered.push(pending);
    }
    debug!("Releasing {} command(s) for {}", buffered.len(), username);

    let mut first = true;
    for pending in buffered {
        if !first && !context.rate.is_zero() {
            sleep(context.rate).await;
        }
        first = false;
        deliver(
            &context.transport,
            &context.stats,
            context.delivery,
            pending.command,
            pending.guard,
        )
        .await;
    }

    state = WorkerState::Done;
    debug!("User worker {} is {:?}", username, state);
}
