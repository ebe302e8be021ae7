use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reel_chrome::config::Config;
use reel_chrome::core::viewmodels::{PlaybackStateStore, Subregion};
use reel_chrome::models::{CastTargetId, MediaMeta};
use reel_chrome::player::{MediaEngine, forward_commands};
use reel_chrome::ui::pages::player::{PlayerInput, PlayerProps, PlayerShell, driver};

/// Stand-in engine for the scripted session: acknowledges every command and
/// echoes the resulting state back into the store.
struct DemoEngine {
    store: PlaybackStateStore,
}

#[async_trait]
impl MediaEngine for DemoEngine {
    async fn play(&self) -> Result<()> {
        info!("engine: play");
        self.store.report_buffering(false);
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        info!("engine: pause");
        Ok(())
    }

    async fn seek(&self, position: Duration) -> Result<()> {
        info!("engine: seek to {:?}", position);
        self.store.report_position(position);
        Ok(())
    }

    async fn set_volume(&self, volume: f64) -> Result<()> {
        info!("engine: volume {:.2}", volume);
        Ok(())
    }

    async fn set_muted(&self, muted: bool) -> Result<()> {
        info!("engine: muted {}", muted);
        Ok(())
    }

    async fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        info!("engine: fullscreen {}", fullscreen);
        Ok(())
    }

    async fn cast_to(&self, target: Option<&CastTargetId>) -> Result<()> {
        info!("engine: cast to {:?}", target);
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reel_chrome=debug")),
        )
        .init();

    info!("Starting Reel chrome demo");
    let config = Config::load()?;

    let store = PlaybackStateStore::new(true);
    store.report_duration(Duration::from_secs(5400));
    store.report_buffering(true);

    let mut media = MediaMeta::movie("movie:heat", "Heat");
    media.year = Some(1995);
    let props = PlayerProps {
        media: Some(media),
        autoplay: true,
        has_children: false,
    };

    let (output_tx, mut output_rx) = mpsc::unbounded_channel();
    let shell = PlayerShell::mount(props, store.clone(), &config, output_tx, Instant::now());
    let mut frames = shell.subscribe_frames();

    let cancel = CancellationToken::new();
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(DemoEngine {
        store: store.clone(),
    });
    let bridge = forward_commands(&store, engine, input_tx.clone(), cancel.clone());
    let player = tokio::spawn(driver::run(shell, input_rx, cancel.clone()));

    let frame_logger = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = frames.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let frame = frames.borrow_and_update().clone();
                        match serde_json::to_string(&frame) {
                            Ok(json) => info!("frame: {}", json),
                            Err(e) => info!("frame could not be serialized: {}", e),
                        }
                    }
                }
            }
        })
    };

    let script = [
        (Duration::from_millis(500), PlayerInput::PlayPause),
        (Duration::from_millis(500), PlayerInput::PlayPause),
        (Duration::from_millis(300), PlayerInput::HoverEnter(Subregion::LeftControls)),
        (Duration::from_secs(4), PlayerInput::HoverLeave(Subregion::LeftControls)),
        (Duration::from_secs(4), PlayerInput::PointerMove { x: 320.0, y: 180.0 }),
        (Duration::from_millis(400), PlayerInput::SeekToRatio(0.5)),
        (Duration::from_secs(4), PlayerInput::EscapePressed),
    ];
    for (delay, input) in script {
        sleep(delay).await;
        info!("demo input: {:?}", input);
        if input_tx.send(input).is_err() {
            break;
        }
    }

    if let Some(output) = output_rx.recv().await {
        info!("player output: {:?}", output);
    }

    cancel.cancel();
    let shell = player.await?;
    bridge.await?;
    frame_logger.await?;
    info!("Demo finished, final chrome state: {:?}", shell.visibility());
    Ok(())
}
