use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::core::viewmodels::{PlaybackStateStore, Property, Subregion};
use crate::models::{CastTargetId, MediaMeta};
use crate::utils::ChromeError;

mod cast_picker;
mod controls_visibility;
pub mod driver;
mod error_boundary;
mod frame;
mod overlay_coordinator;
mod overlay_region;
mod seek_bar;
mod volume;

use cast_picker::CastPicker;
pub use controls_visibility::{ActivityDetector, ControlState};
pub use error_boundary::{ErrorBoundary, MediaFailure};
pub use frame::{ControlBandView, ErrorView, HeaderView, Layer, PlayerFrame};
pub use overlay_coordinator::{ChromeVisibility, OverlayCoordinator};
pub use overlay_region::{OverlayRegion, RegionKind, RegionPhase, RegionPresentation, TransitionId};
pub use seek_bar::{SeekBar, format_duration};
pub use volume::VolumeControl;

/// What the embedder hands the player when mounting it.
#[derive(Debug, Clone, Default)]
pub struct PlayerProps {
    pub media: Option<MediaMeta>,
    pub autoplay: bool,
    /// Whether an embedder presentation is layered above the media
    pub has_children: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    // Activity surface
    PointerMove { x: f64, y: f64 },
    PointerDown,
    PointerLeave,
    KeyPress,
    HoverEnter(Subregion),
    HoverLeave(Subregion),
    ToggleControlsVisibility,
    AnimationFinished {
        region: RegionKind,
        transition: TransitionId,
    },
    // Widget commands
    PlayPause,
    SetVolume(f64),
    VolumeUp,
    VolumeDown,
    ToggleMute,
    Seek(Duration),
    SeekToRatio(f64),
    ToggleFullscreen,
    OpenCastPicker,
    CloseCastPicker,
    SelectCastTarget(Option<CastTargetId>),
    // Media surface and error boundary
    MediaFailed(MediaFailure),
    DismissError,
    GoBack,
    EscapePressed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerOutput {
    NavigateBack,
}

/// One mounted player: media surface, error boundary, activity backdrop and
/// the two overlay bands.
pub struct PlayerShell {
    id: Uuid,
    props: PlayerProps,
    store: PlaybackStateStore,
    detector: ActivityDetector,
    coordinator: OverlayCoordinator,
    error: ErrorBoundary,
    cast_picker: CastPicker,
    frames: Property<PlayerFrame>,
    output: mpsc::UnboundedSender<PlayerOutput>,
}

impl std::fmt::Debug for PlayerShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerShell")
            .field("id", &self.id)
            .field("media", &self.props.media.as_ref().map(|m| &m.id))
            .field("control_state", &self.detector.state())
            .field("visibility", &self.coordinator.visibility())
            .field("error", &self.error.failure())
            .finish()
    }
}

impl PlayerShell {
    /// Mount the player. Mounting counts as activity, so the chrome starts
    /// entering immediately.
    pub fn mount(
        props: PlayerProps,
        store: PlaybackStateStore,
        config: &Config,
        output: mpsc::UnboundedSender<PlayerOutput>,
        now: Instant,
    ) -> Self {
        let id = Uuid::new_v4();
        info!(
            player = %id,
            media = ?props.media.as_ref().map(|m| m.id.as_str()),
            autoplay = props.autoplay,
            "Mounting player"
        );

        let mut shell = Self {
            id,
            props,
            store,
            detector: ActivityDetector::new(&config.activity),
            coordinator: OverlayCoordinator::new(&config.overlay),
            error: ErrorBoundary::new(),
            cast_picker: CastPicker::new(),
            frames: Property::new(PlayerFrame { layers: Vec::new() }, "frame"),
            output,
        };
        shell
            .detector
            .record_activity(&shell.store.hover_flags(), now);
        shell.sync(now);
        shell
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &PlaybackStateStore {
        &self.store
    }

    pub fn has_error(&self) -> bool {
        self.error.has_error()
    }

    pub fn control_state(&self) -> ControlState {
        self.detector.state()
    }

    pub fn visibility(&self) -> ChromeVisibility {
        self.coordinator.visibility()
    }

    /// For widgets whose behavior depends on the chrome's visibility
    pub fn subscribe_visibility(&self) -> watch::Receiver<ChromeVisibility> {
        self.coordinator.subscribe()
    }

    pub fn subscribe_frames(&self) -> watch::Receiver<PlayerFrame> {
        self.frames.watch()
    }

    pub fn region(&self, kind: RegionKind) -> &OverlayRegion {
        self.coordinator.region(kind)
    }

    pub fn cast_picker_open(&self) -> bool {
        self.cast_picker.is_open()
    }

    /// Earliest instant at which [`PlayerShell::tick`] has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.detector.next_deadline(), self.coordinator.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn handle(&mut self, input: PlayerInput, now: Instant) {
        match self.try_handle(input, now) {
            Ok(()) => {}
            Err(ChromeError::ErrorActive) => debug!(player = %self.id, "Input ignored while error is shown"),
            Err(e) => warn!(player = %self.id, "Command rejected: {}", e),
        }
        self.sync(now);
    }

    fn try_handle(&mut self, input: PlayerInput, now: Instant) -> Result<(), ChromeError> {
        match input {
            PlayerInput::MediaFailed(failure) => {
                if self.error.show_error(failure) {
                    self.detector.suspend(now);
                    self.coordinator.suspend(now);
                }
                Ok(())
            }
            PlayerInput::DismissError => {
                if self.error.clear_error().is_some() {
                    info!(player = %self.id, "Error dismissed, resuming overlay");
                    self.detector.resume(&self.store.hover_flags(), now);
                    self.coordinator.resume(now);
                }
                Ok(())
            }
            PlayerInput::GoBack => {
                self.navigate_back();
                Ok(())
            }
            PlayerInput::EscapePressed => {
                // ESC exits fullscreen if in fullscreen, otherwise navigates back
                if self.store.is_fullscreen() {
                    self.store.toggle_fullscreen();
                } else {
                    self.navigate_back();
                }
                Ok(())
            }
            // The pointer keeps moving under the error presentation, so hover
            // flags stay current for when the detector resumes
            PlayerInput::HoverEnter(region) if self.error.has_error() => {
                self.store.set_hover(region, true);
                Ok(())
            }
            PlayerInput::HoverLeave(region) if self.error.has_error() => {
                self.store.set_hover(region, false);
                Ok(())
            }
            _ if self.error.has_error() => Err(ChromeError::ErrorActive),
            PlayerInput::AnimationFinished { region, transition } => {
                self.coordinator.animation_finished(region, transition);
                Ok(())
            }
            input => self.handle_chrome_input(input, now),
        }
    }

    fn handle_chrome_input(&mut self, input: PlayerInput, now: Instant) -> Result<(), ChromeError> {
        let hover = self.store.hover_flags();
        match input {
            PlayerInput::PointerMove { x, y } => {
                self.detector.pointer_moved(x, y, &hover, now);
            }
            PlayerInput::PointerDown | PlayerInput::KeyPress => {
                self.detector.record_activity(&hover, now);
            }
            PlayerInput::PointerLeave => {
                self.detector.pointer_left(&hover);
            }
            PlayerInput::HoverEnter(region) => {
                self.store.set_hover(region, true);
                self.detector.hover_changed(&self.store.hover_flags(), now);
            }
            PlayerInput::HoverLeave(region) => {
                self.store.set_hover(region, false);
                self.detector.hover_changed(&self.store.hover_flags(), now);
            }
            PlayerInput::ToggleControlsVisibility => {
                self.detector.toggle(&hover, now);
            }
            command => {
                // Widget commands come from a click or a shortcut. The
                // command may flip a hover flag, so read them afterwards.
                let result = self.handle_command(command);
                self.detector.record_activity(&self.store.hover_flags(), now);
                return result;
            }
        }
        Ok(())
    }

    fn handle_command(&mut self, command: PlayerInput) -> Result<(), ChromeError> {
        let volume = VolumeControl::new(&self.store);
        let seek_bar = SeekBar::new(&self.store);
        match command {
            PlayerInput::PlayPause => {
                self.store.toggle_play();
            }
            PlayerInput::SetVolume(level) => {
                volume.set_volume(level);
            }
            PlayerInput::VolumeUp => {
                volume.volume_up();
            }
            PlayerInput::VolumeDown => {
                volume.volume_down();
            }
            PlayerInput::ToggleMute => {
                volume.toggle_mute();
            }
            PlayerInput::Seek(position) => {
                self.store.seek(position);
            }
            PlayerInput::SeekToRatio(ratio) => {
                seek_bar.seek_to_ratio(ratio);
            }
            PlayerInput::ToggleFullscreen => {
                let fullscreen = self.store.toggle_fullscreen();
                debug!("Toggling fullscreen to: {}", fullscreen);
            }
            PlayerInput::OpenCastPicker => {
                let visibility = self.coordinator.visibility();
                self.cast_picker.open(&visibility, &self.store)?;
            }
            PlayerInput::CloseCastPicker => self.cast_picker.close(&self.store),
            PlayerInput::SelectCastTarget(target) => {
                self.cast_picker.select(target.as_ref(), &self.store)?;
            }
            other => debug!("Unhandled player input: {:?}", other),
        }
        Ok(())
    }

    /// Someone is still listening for `NavigateBack`
    fn can_go_back(&self) -> bool {
        !self.output.is_closed()
    }

    fn navigate_back(&self) {
        info!(player = %self.id, "Navigating back from player");
        if self.output.send(PlayerOutput::NavigateBack).is_err() {
            debug!("Player output receiver dropped");
        }
    }

    /// Advance timers: idle expiry first, then animation fallbacks.
    pub fn tick(&mut self, now: Instant) {
        if !self.error.has_error() {
            self.detector.poll(now);
            self.coordinator.apply(self.detector.signal(), now);
            self.coordinator.tick(now);
        }
        self.publish_frame(now);
    }

    fn sync(&mut self, now: Instant) {
        if !self.error.has_error() {
            // Pinned hover flags may have changed since the signal was computed
            if self.store.hover_flags().any() && !self.detector.signal() {
                self.detector.hover_changed(&self.store.hover_flags(), now);
            }
            self.coordinator.apply(self.detector.signal(), now);
        }
        self.publish_frame(now);
    }

    fn publish_frame(&self, now: Instant) {
        self.frames.set_if_changed(self.frame(now));
    }

    pub fn frame(&self, now: Instant) -> PlayerFrame {
        let mut layers = vec![Layer::Media];

        if let Some(failure) = self.error.failure() {
            layers.push(Layer::Error(ErrorView {
                message: failure.message.clone(),
                code: failure.code,
                media: self.props.media.clone(),
                can_go_back: self.can_go_back(),
            }));
        } else {
            layers.push(Layer::Backdrop {
                dimmed: self.coordinator.shown(),
            });
            if self.store.is_buffering() {
                layers.push(Layer::Loading);
            } else if self.store.is_paused() {
                layers.push(Layer::MiddlePause);
            }

            let title = self.props.media.as_ref().map(|m| m.display_title());
            let controls = self.coordinator.region(RegionKind::ControlBand);
            if controls.phase().is_displayed() {
                let volume = VolumeControl::new(&self.store);
                let seek_bar = SeekBar::new(&self.store);
                layers.push(Layer::ControlBand(ControlBandView {
                    presentation: controls.presentation(now),
                    paused: self.store.is_paused(),
                    volume: volume.level(),
                    volume_icon: volume.icon_name(),
                    progress: seek_bar.progress(),
                    time_label: seek_bar.time_label(),
                    title: title.clone(),
                    cast_available: !self.store.cast_targets().is_empty(),
                    cast_picker_open: self.cast_picker.is_open(),
                    casting_to: self.store.cast_target(),
                    fullscreen: self.store.is_fullscreen(),
                }));
            }
            let header = self.coordinator.region(RegionKind::Header);
            if header.phase().is_displayed() {
                layers.push(Layer::Header(HeaderView {
                    presentation: header.presentation(now),
                    title,
                    can_go_back: self.can_go_back(),
                }));
            }
        }

        if self.props.has_children {
            layers.push(Layer::Children);
        }
        PlayerFrame { layers }
    }
}
