use std::sync::Arc;

use tracing::{error, info};

use crate::command::Command;
use crate::config::DeliveryMode;
use crate::transport::Transport;

use super::barrier::CompletionGuard;
use super::stats::RunStats;

/// Sends one command, either awaiting it or on a detached task.
pub(super) async fn deliver(
    transport: &Arc<dyn Transport>,
    stats: &Arc<RunStats>,
    delivery: DeliveryMode,
    command: Command,
    guard: CompletionGuard,
) {
    match delivery {
        DeliveryMode::Sequential => {
            send_and_record(Arc::clone(transport), Arc::clone(stats), command, guard).await;
        }
        DeliveryMode::Detached => {
            drop(tokio::spawn(send_and_record(
                Arc::clone(transport),
                Arc::clone(stats),
                command,
                guard,
            )));
        }
    }
}

async fn send_and_record(
    transport: Arc<dyn Transport>,
    stats: Arc<RunStats>,
    command: Command,
    guard: CompletionGuard,
) {
    let protocol = transport.protocol();
    match transport.send(&command).await {
        Ok(()) => {
            stats.record_sent();
            info!("{}: {}", protocol, command.raw_text());
        }
        Err(err) => {
            stats.record_failed();
            error!("{} send failed for '{}': {}", protocol, command.raw_text(), err);
        }
    }
    drop(guard);
}
