use tracing::debug;

use super::overlay_coordinator::ChromeVisibility;
use crate::core::viewmodels::{PlaybackStateStore, Subregion};
use crate::models::CastTargetId;
use crate::utils::ChromeError;

/// Popover listing discovered receivers.
///
/// The picker only opens while the control band is fully visible, and while
/// open it holds the `CastPicker` hover flag so the chrome cannot fade out
/// from under it.
#[derive(Debug, Default)]
pub struct CastPicker {
    open: bool,
}

impl CastPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(
        &mut self,
        visibility: &ChromeVisibility,
        store: &PlaybackStateStore,
    ) -> Result<(), ChromeError> {
        if !visibility.accepts_interaction() {
            return Err(ChromeError::ChromeHidden(visibility.controls));
        }
        if !self.open {
            debug!("Opening cast picker");
            self.open = true;
            store.set_hover(Subregion::CastPicker, true);
        }
        Ok(())
    }

    pub fn close(&mut self, store: &PlaybackStateStore) {
        if self.open {
            debug!("Closing cast picker");
            self.open = false;
            store.set_hover(Subregion::CastPicker, false);
        }
    }

    /// Select a receiver (or local playback) and close the popover
    pub fn select(
        &mut self,
        target: Option<&CastTargetId>,
        store: &PlaybackStateStore,
    ) -> Result<(), ChromeError> {
        store.select_cast_target(target)?;
        self.close(store);
        Ok(())
    }
}
