use serde::Serialize;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

use super::overlay_region::{OverlayRegion, RegionKind, RegionPhase, TransitionId};
use crate::config::OverlayConfig;
use crate::core::viewmodels::Property;

/// Snapshot of the chrome's visibility handed to visibility-aware widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChromeVisibility {
    /// The activity signal currently applied to both bands
    pub shown: bool,
    pub header: RegionPhase,
    pub controls: RegionPhase,
}

impl ChromeVisibility {
    /// Whether widgets in the control band may start an interaction
    pub fn accepts_interaction(&self) -> bool {
        self.controls.is_interactive()
    }
}

impl Default for ChromeVisibility {
    fn default() -> Self {
        Self {
            shown: false,
            header: RegionPhase::Hidden,
            controls: RegionPhase::Hidden,
        }
    }
}

/// Drives the header and control bands from one signal so they move in
/// lockstep, and publishes the combined visibility.
#[derive(Debug)]
pub struct OverlayCoordinator {
    header: OverlayRegion,
    controls: OverlayRegion,
    shown: bool,
    visibility: Property<ChromeVisibility>,
}

impl OverlayCoordinator {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            header: OverlayRegion::new(RegionKind::Header, &config.header),
            controls: OverlayRegion::new(RegionKind::ControlBand, &config.controls),
            shown: false,
            visibility: Property::new(ChromeVisibility::default(), "chrome_visibility"),
        }
    }

    pub fn region(&self, kind: RegionKind) -> &OverlayRegion {
        match kind {
            RegionKind::Header => &self.header,
            RegionKind::ControlBand => &self.controls,
        }
    }

    fn region_mut(&mut self, kind: RegionKind) -> &mut OverlayRegion {
        match kind {
            RegionKind::Header => &mut self.header,
            RegionKind::ControlBand => &mut self.controls,
        }
    }

    pub fn shown(&self) -> bool {
        self.shown
    }

    pub fn visibility(&self) -> ChromeVisibility {
        ChromeVisibility {
            shown: self.shown,
            header: self.header.phase(),
            controls: self.controls.phase(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ChromeVisibility> {
        self.visibility.watch()
    }

    fn publish(&self) {
        self.visibility.set_if_changed(self.visibility());
    }

    /// Apply the activity signal to both bands in the same update.
    pub fn apply(&mut self, shown: bool, now: Instant) {
        if shown == self.shown {
            return;
        }
        debug!("Activity signal -> {}", shown);
        self.shown = shown;
        self.header.set_shown(shown, now);
        self.controls.set_shown(shown, now);
        self.publish();
    }

    /// Advance fallback deadlines for both bands
    pub fn tick(&mut self, now: Instant) -> bool {
        let header = self.header.tick(now);
        let controls = self.controls.tick(now);
        if header || controls {
            self.publish();
        }
        header || controls
    }

    pub fn animation_finished(&mut self, kind: RegionKind, id: TransitionId) -> bool {
        let finished = self.region_mut(kind).animation_finished(id);
        if finished {
            self.publish();
        }
        finished
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.header.next_deadline(), self.controls.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn suspend(&mut self, now: Instant) {
        self.header.suspend(now);
        self.controls.suspend(now);
    }

    pub fn resume(&mut self, now: Instant) {
        self.header.resume(now);
        self.controls.resume(now);
    }
}
