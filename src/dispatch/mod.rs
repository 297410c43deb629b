//! Dispatch engine: routes parsed commands either straight to the transport
//! or into per-user workers that are released together.
//!
//! In parallel mode every distinct username gets one worker task with an
//! unbounded inbox and a single-use start signal. The script is read to the
//! end first, then every worker is released, and the run waits on the
//! [`CompletionBarrier`] before sending a deferred `DUMPLOG` last.
mod barrier;
mod send;
mod stats;
mod worker;


use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::command::{Command, CommandKind, parse_line};
use crate::config::{DeliveryMode, RunConfig};
use crate::script::ScriptReader;
use crate::transport::{Protocol, Transport};

pub use barrier::{CompletionBarrier, CompletionGuard};
pub use stats::{RunStats, RunSummary};

use send::deliver;
use worker::{UserWorkerHandle, WorkerContext};

pub struct Dispatcher {
    config: RunConfig,
    transport: Arc<dyn Transport>,
    barrier: CompletionBarrier,
    stats: Arc<RunStats>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(config: RunConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            barrier: CompletionBarrier::new(),
            stats: Arc::new(RunStats::default()),
        }
    }

    #[must_use]
    pub const fn barrier(&self) -> &CompletionBarrier {
        &self.barrier
    }

    /// Replays the whole script and returns once every send has resolved.
    pub async fn run(&self, script: ScriptReader) -> RunSummary {
        let (users, deferred_dumplog) = if self.config.parallel {
            self.run_parallel(script).await
        } else {
            self.run_sequential(script).await;
            (0, false)
        };

        RunSummary {
            lines: self.stats.lines(),
            skipped: self.stats.skipped(),
            sent: self.stats.sent(),
            failed: self.stats.failed(),
            completed: self.barrier.completed(),
            users,
            deferred_dumplog,
        }
    }

    async fn run_sequential(&self, mut script: ScriptReader) {
        let mut first = true;
        while let Some(line) = script.next_line().await {
            let Some(command) = self.parse(&line) else {
                continue;
            };
            if !first {
                self.pause().await;
            }
            first = false;

            let guard = self.barrier.enter();
            deliver(
                &self.transport,
                &self.stats,
                self.config.delivery,
                command,
                guard,
            )
            .await;
        }
        self.barrier.wait().await;
    }

    async fn run_parallel(&self, mut script: ScriptReader) -> (usize, bool) {
        let mut workers: HashMap<String, UserWorkerHandle> = HashMap::new();
        let mut deferred: Option<Command> = None;
        let context = self.worker_context();

        while let Some(line) = script.next_line().await {
            let Some(command) = self.parse(&line) else {
                continue;
            };

            if command.kind() == CommandKind::Dumplog {
                if let Some(previous) = deferred.replace(command) {
                    warn!(
                        "Multiple DUMPLOG lines; dropping '{}' in favour of the last one.",
                        previous.raw_text()
                    );
                }
                continue;
            }

            let Some(username) = command.username().map(str::to_owned) else {
                self.stats.record_skipped();
                warn!("Skipping line without username: {}", command.raw_text());
                continue;
            };

            let guard = self.barrier.enter();
            let user_count = workers.len();
            let handle = workers.entry(username).or_insert_with_key(|name| {
                debug!("User {} joined (user count: {})", name, user_count.saturating_add(1));
                UserWorkerHandle::spawn(name.clone(), context.clone())
            });
            handle.push(command, guard);
        }

        let users = workers.len();
        info!("{} user(s) buffered", users);
        self.countdown().await;

        for handle in workers.values_mut() {
            handle.release();
        }
        self.barrier.wait().await;

        let tasks = workers.into_values().map(UserWorkerHandle::into_task);
        for result in join_all(tasks).await {
            if let Err(err) = result {
                error!("User worker failed: {}", err);
            }
        }

        let deferred_dumplog = deferred.is_some();
        if let Some(dumplog) = deferred {
            let guard = self.barrier.enter();
            deliver(
                &self.transport,
                &self.stats,
                self.config.delivery,
                dumplog,
                guard,
            )
            .await;
            self.barrier.wait().await;
        }

        (users, deferred_dumplog)
    }

    /// Parses one line; failures are logged and skipped.
    fn parse(&self, line: &str) -> Option<Command> {
        if line.trim().is_empty() {
            return None;
        }
        self.stats.record_line();
        match parse_line(line, self.config.transactions) {
            Ok(command) => Some(command),
            Err(err) => {
                self.stats.record_skipped();
                warn!("Skipping line ({}): {}", err.category(), err);
                None
            }
        }
    }

    async fn pause(&self) {
        if !self.config.rate.is_zero() {
            sleep(self.config.rate).await;
        }
    }

    async fn countdown(&self) {
        for remaining in (1..=self.config.countdown_secs).rev() {
            info!("Parallel execution starting in {}", remaining);
            sleep(Duration::from_secs(1)).await;
        }
        info!("Starting...");
    }

    /// HTTP users fire each request and pace on `rate` alone; TCP users
    /// keep the configured delivery.
    fn worker_context(&self) -> WorkerContext {
        let delivery = match self.transport.protocol() {
            Protocol::Http => DeliveryMode::Detached,
            Protocol::Tcp => self.config.delivery,
        };
        WorkerContext {
            transport: Arc::clone(&self.transport),
            stats: Arc::clone(&self.stats),
            rate: self.config.rate,
            delivery,
        }
    }
}
