use std::time::Duration;

use crate::core::viewmodels::PlaybackStateStore;

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Scrubber and clock readouts derived from the store.
pub struct SeekBar<'a> {
    store: &'a PlaybackStateStore,
}

impl<'a> SeekBar<'a> {
    pub fn new(store: &'a PlaybackStateStore) -> Self {
        Self { store }
    }

    /// Fraction of the media played (0.0 - 1.0), zero while duration is unknown
    pub fn progress(&self) -> f64 {
        let duration = self.store.duration();
        if duration.is_zero() {
            return 0.0;
        }
        (self.store.position().as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Seek to a click/drag location given as a fraction of the bar width
    pub fn seek_to_ratio(&self, ratio: f64) -> Duration {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let target = self.store.duration().mul_f64(ratio);
        self.store.seek(target)
    }

    /// "position / duration", with "--:--" until the duration is known
    pub fn time_label(&self) -> String {
        let duration = self.store.duration();
        let duration_label = if duration.is_zero() {
            "--:--".to_string()
        } else {
            format_duration(duration)
        };
        format!("{} / {}", format_duration(self.store.position()), duration_label)
    }
}
