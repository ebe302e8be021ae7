use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::config::RegionConfig;

/// Transition phase of one overlay band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionPhase {
    /// Removed from layout, never receives input
    Hidden,
    /// Displayed and animating in, not yet interactive
    Entering,
    Visible,
    /// Displayed and animating out, no longer interactive
    Exiting,
}

impl RegionPhase {
    pub fn is_interactive(self) -> bool {
        self == RegionPhase::Visible
    }

    pub fn is_displayed(self) -> bool {
        self != RegionPhase::Hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RegionKind {
    Header,
    ControlBand,
}

impl RegionKind {
    /// Offset the band slides from while hidden: the header drops in from
    /// above, the control band rises from below.
    pub fn slide_px(self) -> f32 {
        match self {
            RegionKind::Header => -16.0,
            RegionKind::ControlBand => 16.0,
        }
    }
}

/// Identifies one animation. Completion reports for an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionId(u64);

/// What the renderer needs to draw a band at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionPresentation {
    pub displayed: bool,
    pub opacity: f32,
    pub offset_px: f32,
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    id: TransitionId,
    /// Visual position (0 hidden, 1 shown) when this animation started
    from: f32,
    started_at: Instant,
    deadline: Instant,
}

/// Four-phase show/hide machine for a single overlay band.
///
/// Completion comes from the renderer through [`OverlayRegion::animation_finished`];
/// if that never arrives, [`OverlayRegion::tick`] forces the terminal phase
/// once the transition's duration has elapsed.
#[derive(Debug)]
pub struct OverlayRegion {
    kind: RegionKind,
    enter: Duration,
    exit: Duration,
    phase: RegionPhase,
    animation: Option<Animation>,
    next_id: u64,
    suspended_at: Option<Instant>,
}

impl OverlayRegion {
    pub fn new(kind: RegionKind, config: &RegionConfig) -> Self {
        Self {
            kind,
            enter: config.enter_duration(),
            exit: config.exit_duration(),
            phase: RegionPhase::Hidden,
            animation: None,
            next_id: 0,
            suspended_at: None,
        }
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn phase(&self) -> RegionPhase {
        self.phase
    }

    pub fn is_interactive(&self) -> bool {
        self.phase.is_interactive()
    }

    /// Id of the animation in flight, if any
    pub fn current_transition(&self) -> Option<TransitionId> {
        self.animation.map(|a| a.id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.suspended_at.is_some() {
            return None;
        }
        self.animation.map(|a| a.deadline)
    }

    /// Visual position between 0.0 (hidden) and 1.0 (shown)
    pub fn position(&self, now: Instant) -> f32 {
        let Some(animation) = self.animation else {
            return if self.phase == RegionPhase::Visible { 1.0 } else { 0.0 };
        };
        let now = self.suspended_at.unwrap_or(now);
        let elapsed = now.saturating_duration_since(animation.started_at);
        match self.phase {
            RegionPhase::Entering => (animation.from + fraction(elapsed, self.enter)).min(1.0),
            RegionPhase::Exiting => (animation.from - fraction(elapsed, self.exit)).max(0.0),
            RegionPhase::Visible => 1.0,
            RegionPhase::Hidden => 0.0,
        }
    }

    /// Drive the band toward shown or hidden. Returns the id of a newly
    /// started animation, or `None` if the request changes nothing.
    pub fn set_shown(&mut self, shown: bool, now: Instant) -> Option<TransitionId> {
        let current = self.position(now);
        match (self.phase, shown) {
            (RegionPhase::Hidden, true) | (RegionPhase::Exiting, true) => {
                Some(self.begin(RegionPhase::Entering, current, now))
            }
            (RegionPhase::Visible, false) | (RegionPhase::Entering, false) => {
                Some(self.begin(RegionPhase::Exiting, current, now))
            }
            _ => None,
        }
    }

    fn begin(&mut self, phase: RegionPhase, from: f32, now: Instant) -> TransitionId {
        let from = from.clamp(0.0, 1.0);
        let remaining = match phase {
            RegionPhase::Entering => scale(self.enter, 1.0 - from),
            _ => scale(self.exit, from),
        };

        self.next_id += 1;
        let id = TransitionId(self.next_id);
        debug!(
            region = ?self.kind,
            "{:?} -> {:?} from position {:.2}, {:?} remaining",
            self.phase, phase, from, remaining
        );

        self.phase = phase;
        self.animation = Some(Animation {
            id,
            from,
            started_at: now,
            deadline: now + remaining,
        });
        id
    }

    fn complete(&mut self) {
        let next = match self.phase {
            RegionPhase::Entering => RegionPhase::Visible,
            RegionPhase::Exiting => RegionPhase::Hidden,
            other => other,
        };
        debug!(region = ?self.kind, "{:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.animation = None;
    }

    /// The renderer reports that animation `id` finished.
    pub fn animation_finished(&mut self, id: TransitionId) -> bool {
        if self.suspended_at.is_some() {
            return false;
        }
        match self.animation {
            Some(animation) if animation.id == id => {
                self.complete();
                true
            }
            _ => {
                trace!(region = ?self.kind, "Ignoring stale completion for {:?}", id);
                false
            }
        }
    }

    /// Force the terminal phase once the fallback deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_deadline() {
            Some(deadline) if now >= deadline => {
                trace!(region = ?self.kind, "Fallback deadline reached");
                self.complete();
                true
            }
            _ => false,
        }
    }

    pub fn suspend(&mut self, now: Instant) {
        if self.suspended_at.is_none() {
            self.suspended_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        let Some(suspended_at) = self.suspended_at.take() else {
            return;
        };
        let paused_for = now.saturating_duration_since(suspended_at);
        if let Some(animation) = self.animation.as_mut() {
            animation.started_at += paused_for;
            animation.deadline += paused_for;
        }
    }

    pub fn presentation(&self, now: Instant) -> RegionPresentation {
        let position = self.position(now);
        RegionPresentation {
            displayed: self.phase.is_displayed(),
            opacity: position,
            offset_px: (1.0 - position) * self.kind.slide_px(),
            interactive: self.phase.is_interactive(),
        }
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / total.as_secs_f64()) as f32
    }
}

/// `total * factor`, exact at 0 and 1
fn scale(total: Duration, factor: f32) -> Duration {
    if factor <= 0.0 {
        Duration::ZERO
    } else if factor >= 1.0 {
        total
    } else {
        Duration::from_nanos((total.as_nanos() as f64 * factor as f64).round() as u64)
    }
}
