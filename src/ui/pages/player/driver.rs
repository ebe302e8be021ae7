//! Event loop that owns a [`PlayerShell`] on a single task.
//!
//! Inputs are applied in arrival order; between inputs the loop sleeps until
//! the shell's next deadline (idle expiry or an animation fallback).

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{PlayerInput, PlayerShell};

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Run until cancelled or every input sender is dropped, then hand the
/// shell back to the caller.
pub async fn run(
    mut shell: PlayerShell,
    mut inputs: mpsc::UnboundedReceiver<PlayerInput>,
    cancel: CancellationToken,
) -> PlayerShell {
    info!(player = %shell.id(), "Player driver started");
    loop {
        let deadline = shell.next_deadline();
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Player driver cancelled");
                break;
            }
            input = inputs.recv() => match input {
                Some(input) => shell.handle(input, Instant::now()),
                None => {
                    debug!("Player input channel closed");
                    break;
                }
            },
            _ = sleep_until_deadline(deadline) => shell.tick(Instant::now()),
        }
    }
    info!(player = %shell.id(), "Player driver stopped");
    shell
}
