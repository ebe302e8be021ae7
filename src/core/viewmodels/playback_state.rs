use super::property::{Property, PropertyLike, PropertySubscriber};
use crate::models::{CastTarget, CastTargetId};
use crate::utils::ChromeError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

/// Named areas of the chrome whose hover state pins the controls open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Subregion {
    /// Play/pause, volume and clock cluster at the left of the control band
    LeftControls,
    Scrubber,
    /// Set while the cast target popover is open
    CastPicker,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverFlags {
    active: BTreeSet<Subregion>,
}

impl HoverFlags {
    pub fn any(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_set(&self, region: Subregion) -> bool {
        self.active.contains(&region)
    }

    /// Returns true if the flag actually changed
    pub fn set(&mut self, region: Subregion, hovered: bool) -> bool {
        if hovered {
            self.active.insert(region)
        } else {
            self.active.remove(&region)
        }
    }
}

/// Commands the chrome issues toward the external playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f64),
    SetMuted(bool),
    SetFullscreen(bool),
    CastTo(Option<CastTargetId>),
}

/// Playback facts and interaction flags for one player instance.
///
/// Every field has a single writer: the engine reports position, duration,
/// buffering and discovered cast targets; each leaf widget owns the field it
/// commands (volume, paused, fullscreen, selected target, its hover flag).
/// Clones share the same underlying properties.
#[derive(Debug, Clone)]
pub struct PlaybackStateStore {
    paused: Property<bool>,
    buffering: Property<bool>,
    position: Property<Duration>,
    duration: Property<Duration>,
    volume: Property<f64>,
    muted: Property<bool>,
    fullscreen: Property<bool>,
    cast_targets: Property<Vec<CastTarget>>,
    cast_target: Property<Option<CastTargetId>>,
    hover: Property<HoverFlags>,
    commands: broadcast::Sender<PlaybackCommand>,
}

impl PlaybackStateStore {
    pub fn new(autoplay: bool) -> Self {
        let (commands, _) = broadcast::channel(64);
        Self {
            paused: Property::new(!autoplay, "paused"),
            buffering: Property::new(false, "buffering"),
            position: Property::new(Duration::ZERO, "position"),
            duration: Property::new(Duration::ZERO, "duration"),
            volume: Property::new(1.0, "volume"),
            muted: Property::new(false, "muted"),
            fullscreen: Property::new(false, "fullscreen"),
            cast_targets: Property::new(Vec::new(), "cast_targets"),
            cast_target: Property::new(None, "cast_target"),
            hover: Property::new(HoverFlags::default(), "hover"),
            commands,
        }
    }

    fn emit(&self, command: PlaybackCommand) {
        debug!("Playback command: {:?}", command);
        // No receiver just means no engine is attached yet
        let _ = self.commands.send(command);
    }

    pub fn subscribe_commands(&self) -> broadcast::Receiver<PlaybackCommand> {
        self.commands.subscribe()
    }

    pub fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber> {
        self.properties()
            .into_iter()
            .find(|p| p.name() == property_name)
            .map(|p| p.subscribe())
    }

    pub fn properties(&self) -> Vec<&dyn PropertyLike> {
        vec![
            &self.paused,
            &self.buffering,
            &self.position,
            &self.duration,
            &self.volume,
            &self.muted,
            &self.fullscreen,
            &self.cast_targets,
            &self.cast_target,
            &self.hover,
        ]
    }

    // Reads

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering.get()
    }

    pub fn position(&self) -> Duration {
        self.position.get()
    }

    pub fn duration(&self) -> Duration {
        self.duration.get()
    }

    pub fn volume(&self) -> f64 {
        self.volume.get()
    }

    pub fn is_muted(&self) -> bool {
        self.muted.get()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    pub fn cast_targets(&self) -> Vec<CastTarget> {
        self.cast_targets.get()
    }

    pub fn cast_target(&self) -> Option<CastTargetId> {
        self.cast_target.get()
    }

    pub fn hover_flags(&self) -> HoverFlags {
        self.hover.get()
    }

    pub fn is_hovered(&self, region: Subregion) -> bool {
        self.hover.with(|flags| flags.is_set(region))
    }

    // Widget commands

    /// Flip play/pause, returning the new paused state
    pub fn toggle_play(&self) -> bool {
        let paused = !self.paused.get();
        self.paused.set(paused);
        self.emit(if paused {
            PlaybackCommand::Pause
        } else {
            PlaybackCommand::Play
        });
        paused
    }

    /// Set volume level (0.0 - 1.0), returning the clamped value
    pub fn set_volume(&self, volume: f64) -> f64 {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        if self.volume.set_if_changed(volume) {
            self.emit(PlaybackCommand::SetVolume(volume));
        }
        volume
    }

    pub fn set_muted(&self, muted: bool) {
        if self.muted.set_if_changed(muted) {
            self.emit(PlaybackCommand::SetMuted(muted));
        }
    }

    /// Seek to `position`, clamped to the known duration
    pub fn seek(&self, position: Duration) -> Duration {
        let duration = self.duration.get();
        let position = if duration.is_zero() {
            position
        } else {
            position.min(duration)
        };
        self.position.set(position);
        self.emit(PlaybackCommand::Seek(position));
        position
    }

    /// Flip fullscreen, returning the new state
    pub fn toggle_fullscreen(&self) -> bool {
        let fullscreen = !self.fullscreen.get();
        self.fullscreen.set(fullscreen);
        self.emit(PlaybackCommand::SetFullscreen(fullscreen));
        fullscreen
    }

    /// Select a discovered receiver, or `None` to play locally again
    pub fn select_cast_target(&self, target: Option<&CastTargetId>) -> Result<(), ChromeError> {
        if let Some(id) = target {
            let known = self.cast_targets.with(|targets| targets.iter().any(|t| &t.id == id));
            if !known {
                return Err(ChromeError::UnknownCastTarget(id.clone()));
            }
        }
        let target = target.cloned();
        if self.cast_target.set_if_changed(target.clone()) {
            self.emit(PlaybackCommand::CastTo(target));
        }
        Ok(())
    }

    /// Returns true if the flag changed
    pub fn set_hover(&self, region: Subregion, hovered: bool) -> bool {
        let mut changed = false;
        self.hover.update(|flags| changed = flags.set(region, hovered));
        changed
    }

    // Engine reports

    pub fn report_paused(&self, paused: bool) {
        self.paused.set_if_changed(paused);
    }

    pub fn report_buffering(&self, buffering: bool) {
        self.buffering.set_if_changed(buffering);
    }

    pub fn report_position(&self, position: Duration) {
        self.position.set_if_changed(position);
    }

    pub fn report_duration(&self, duration: Duration) {
        self.duration.set_if_changed(duration);
    }

    /// Replace the discovered receivers, dropping the selection if it vanished
    pub fn report_cast_targets(&self, targets: Vec<CastTarget>) {
        if let Some(selected) = self.cast_target.get()
            && !targets.iter().any(|t| t.id == selected)
        {
            debug!("Cast target {} disappeared, returning to local playback", selected);
            self.cast_target.set(None);
        }
        self.cast_targets.set(targets);
    }
}
