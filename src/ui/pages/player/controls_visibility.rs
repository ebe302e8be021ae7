use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::config::ActivityConfig;
use crate::core::viewmodels::HoverFlags;

/// Control visibility state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// Controls are hidden and the activity signal is false
    Hidden,
    /// Controls are visible with the inactivity timer running
    Visible { idle_deadline: Instant },
    /// Controls are pinned visible because a subregion is hovered
    Hovering,
}

/// Turns pointer, keyboard and hover input into the single
/// "controls should be shown" signal.
///
/// The detector never reads the clock itself: every entry point takes `now`,
/// and [`ActivityDetector::next_deadline`] tells the caller when to come back
/// and [`poll`](ActivityDetector::poll) for idle expiry.
#[derive(Debug)]
pub struct ActivityDetector {
    state: ControlState,
    idle_timeout: Duration,
    mouse_move_threshold: f64,
    last_mouse_position: Option<(f64, f64)>,
    suspended_at: Option<Instant>,
}

impl ActivityDetector {
    pub fn new(config: &ActivityConfig) -> Self {
        Self {
            state: ControlState::Hidden,
            idle_timeout: config.idle_timeout(),
            mouse_move_threshold: config.pointer_move_threshold.max(0.0),
            last_mouse_position: None,
            suspended_at: None,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// The activity signal
    pub fn signal(&self) -> bool {
        !matches!(self.state, ControlState::Hidden)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    /// When the idle timer fires, if it is running
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_suspended() {
            return None;
        }
        match self.state {
            ControlState::Visible { idle_deadline } => Some(idle_deadline),
            _ => None,
        }
    }

    fn transition_to_visible(&mut self, now: Instant) {
        // Restarting the deadline is what debounces continuous pointer movement
        self.state = ControlState::Visible {
            idle_deadline: now + self.idle_timeout,
        };
    }

    fn transition_to_hovering(&mut self) {
        if self.state != ControlState::Hovering {
            debug!("Controls pinned by hover");
        }
        self.state = ControlState::Hovering;
    }

    fn transition_to_hidden(&mut self) {
        if self.state != ControlState::Hidden {
            debug!("Controls hidden");
        }
        self.state = ControlState::Hidden;
    }

    /// A qualifying input (pointer down, key press, significant move).
    pub fn record_activity(&mut self, hover: &HoverFlags, now: Instant) -> bool {
        if hover.any() {
            self.transition_to_hovering();
        } else {
            self.transition_to_visible(now);
        }
        self.signal()
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, hover: &HoverFlags, now: Instant) -> bool {
        if !self.mouse_movement_exceeds_threshold(x, y) {
            return self.signal();
        }
        self.last_mouse_position = Some((x, y));
        self.record_activity(hover, now)
    }

    /// A subregion flag flipped. Leaving the last hovered subregion restarts
    /// the idle timer from `now`.
    pub fn hover_changed(&mut self, hover: &HoverFlags, now: Instant) -> bool {
        if !hover.any() && self.state == ControlState::Hovering {
            debug!("Hover released, restarting inactivity timer");
        }
        self.record_activity(hover, now)
    }

    /// The pointer left the player surface entirely
    pub fn pointer_left(&mut self, hover: &HoverFlags) -> bool {
        self.last_mouse_position = None;
        if hover.any() {
            debug!("Hover flag set, not hiding controls on surface leave");
            self.transition_to_hovering();
        } else {
            self.transition_to_hidden();
        }
        self.signal()
    }

    /// Keyboard toggle: hides unless pinned, shows otherwise
    pub fn toggle(&mut self, hover: &HoverFlags, now: Instant) -> bool {
        match self.state {
            ControlState::Hidden => self.record_activity(hover, now),
            _ if hover.any() => self.signal(),
            _ => {
                self.transition_to_hidden();
                false
            }
        }
    }

    /// Expire the idle timer if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(deadline) = self.next_deadline()
            && now >= deadline
        {
            debug!("Inactivity timeout after {:?}", self.idle_timeout);
            self.transition_to_hidden();
        }
        self.signal()
    }

    /// Freeze the idle timer (the error presentation is up).
    pub fn suspend(&mut self, now: Instant) {
        if self.suspended_at.is_none() {
            self.suspended_at = Some(now);
        }
    }

    /// Unfreeze, shifting the idle deadline by the time spent suspended and
    /// re-reading hover flags that may have changed meanwhile.
    pub fn resume(&mut self, hover: &HoverFlags, now: Instant) {
        let Some(suspended_at) = self.suspended_at.take() else {
            return;
        };
        let paused_for = now.saturating_duration_since(suspended_at);
        match self.state {
            ControlState::Visible { .. } if hover.any() => self.transition_to_hovering(),
            ControlState::Visible { idle_deadline } => {
                self.state = ControlState::Visible {
                    idle_deadline: idle_deadline + paused_for,
                };
            }
            ControlState::Hovering if !hover.any() => self.transition_to_visible(now),
            _ => {}
        }
    }

    /// Check if mouse movement exceeds threshold
    fn mouse_movement_exceeds_threshold(&self, x: f64, y: f64) -> bool {
        if let Some((last_x, last_y)) = self.last_mouse_position {
            let dx = x - last_x;
            let dy = y - last_y;
            (dx * dx + dy * dy).sqrt() >= self.mouse_move_threshold
        } else {
            true // First movement always exceeds threshold
        }
    }
}
