use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::traits::MediaEngine;
use crate::core::viewmodels::{PlaybackCommand, PlaybackStateStore};
use crate::ui::pages::player::{MediaFailure, PlayerInput};

async fn dispatch(engine: &dyn MediaEngine, command: &PlaybackCommand) -> anyhow::Result<()> {
    match command {
        PlaybackCommand::Play => engine.play().await,
        PlaybackCommand::Pause => engine.pause().await,
        PlaybackCommand::Seek(position) => engine.seek(*position).await,
        PlaybackCommand::SetVolume(volume) => engine.set_volume(*volume).await,
        PlaybackCommand::SetMuted(muted) => engine.set_muted(*muted).await,
        PlaybackCommand::SetFullscreen(fullscreen) => engine.set_fullscreen(*fullscreen).await,
        PlaybackCommand::CastTo(target) => engine.cast_to(target.as_ref()).await,
    }
}

/// Forward the store's playback commands to `engine` until cancelled.
///
/// The subscription is taken before this returns, so no command issued
/// afterwards is missed. Engine failures are routed back into the player as
/// [`PlayerInput::MediaFailed`] so the error boundary can show them.
pub fn forward_commands(
    store: &PlaybackStateStore,
    engine: Arc<dyn MediaEngine>,
    inputs: mpsc::UnboundedSender<PlayerInput>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let mut commands = store.subscribe_commands();
    tokio::spawn(async move {
        info!("Engine bridge started");
        loop {
            let command = tokio::select! {
                _ = cancel.cancelled() => break,
                command = commands.recv() => command,
            };
            match command {
                Ok(command) => {
                    debug!("Forwarding {:?} to engine", command);
                    if let Err(e) = dispatch(engine.as_ref(), &command).await {
                        warn!("Engine rejected {:?}: {:#}", command, e);
                        let failure = MediaFailure::new(format!("{e:#}"));
                        if inputs.send(PlayerInput::MediaFailed(failure)).is_err() {
                            debug!("Player input channel closed, stopping bridge");
                            break;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Engine bridge lagged, skipped {} commands", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        info!("Engine bridge stopped");
    })
}
