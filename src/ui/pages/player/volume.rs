use crate::core::viewmodels::PlaybackStateStore;

const VOLUME_STEP: f64 = 0.1;

/// Volume widget commands.
/// Holds no state of its own; every read and write goes through the store.
pub struct VolumeControl<'a> {
    store: &'a PlaybackStateStore,
}

impl<'a> VolumeControl<'a> {
    pub fn new(store: &'a PlaybackStateStore) -> Self {
        Self { store }
    }

    /// Effective level (0.0 - 1.0), zero while muted
    pub fn level(&self) -> f64 {
        if self.store.is_muted() {
            0.0
        } else {
            self.store.volume()
        }
    }

    /// Set volume level (0.0 - 1.0). Dragging the slider up unmutes.
    pub fn set_volume(&self, volume: f64) -> f64 {
        let volume = self.store.set_volume(volume);
        if volume > 0.0 && self.store.is_muted() {
            self.store.set_muted(false);
        }
        volume
    }

    /// Increase volume by 10%, capped at 100%
    pub fn volume_up(&self) -> f64 {
        self.set_volume(step(self.store.volume(), VOLUME_STEP))
    }

    /// Decrease volume by 10%, capped at 0%
    pub fn volume_down(&self) -> f64 {
        self.set_volume(step(self.store.volume(), -VOLUME_STEP))
    }

    pub fn toggle_mute(&self) -> bool {
        let muted = !self.store.is_muted();
        self.store.set_muted(muted);
        muted
    }

    pub fn icon_name(&self) -> &'static str {
        match self.level() {
            l if l <= 0.0 => "audio-volume-muted-symbolic",
            l if l < 0.34 => "audio-volume-low-symbolic",
            l if l < 0.67 => "audio-volume-medium-symbolic",
            _ => "audio-volume-high-symbolic",
        }
    }
}

// Round to the step grid so repeated presses don't accumulate float drift
fn step(volume: f64, delta: f64) -> f64 {
    ((volume + delta) * 10.0).round() / 10.0
}
