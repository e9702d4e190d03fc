use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::error::ClockError;

pub const DEFAULT_CONTROLS_IDLE: Duration = Duration::from_secs(3);

/// Whatever owns the window. Requests are asynchronous: the tracker only
/// flips state once the host reports the change back.
pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), ClockError>;
    fn exit_fullscreen(&mut self) -> Result<(), ClockError>;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FullscreenState {
    pub is_fullscreen: bool,
    pub controls_hidden: bool,
    pub last_activity: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct FullscreenInactivityTracker {
    state: FullscreenState,
    idle_after: Duration,
    tracking: bool,
    countdown: Option<Instant>,
}

impl FullscreenInactivityTracker {
    pub fn new(idle_after: Duration) -> Self {
        Self {
            state: FullscreenState {
                is_fullscreen: false,
                controls_hidden: false,
                last_activity: None,
            },
            idle_after,
            tracking: false,
            countdown: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> FullscreenState {
        self.state
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.is_fullscreen
    }

    pub fn controls_hidden(&self) -> bool {
        self.state.controls_hidden
    }

    pub fn cursor_hidden(&self) -> bool {
        self.state.controls_hidden
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn countdown_deadline(&self) -> Option<Instant> {
        self.countdown
    }

    pub fn enter_fullscreen(&mut self, now: Instant) {
        self.state.is_fullscreen = true;
        self.tracking = true;
        self.activity(now);
    }

    pub fn exit_fullscreen(&mut self) {
        self.state.is_fullscreen = false;
        self.tracking = false;
        self.countdown = None;
        self.state.controls_hidden = false;
    }

    pub fn activity(&mut self, now: Instant) {
        if !self.tracking {
            return;
        }
        self.state.controls_hidden = false;
        self.state.last_activity = Some(now);
        self.countdown = None;
        if self.state.is_fullscreen {
            self.countdown = Some(now + self.idle_after);
        }
    }

    /// Fires the countdown if it has elapsed. Returns true when controls were
    /// hidden by this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.countdown {
            Some(deadline) if self.state.is_fullscreen && now >= deadline => {
                self.countdown = None;
                self.state.controls_hidden = true;
                let idle = self
                    .state
                    .last_activity
                    .map(|at| now.saturating_duration_since(at))
                    .unwrap_or(self.idle_after);
                debug!("controls hidden after {idle:?} idle");
                true
            }
            _ => false,
        }
    }

    /// Host change notification.
    pub fn on_fullscreen_changed(&mut self, is_fullscreen: bool, now: Instant) {
        if is_fullscreen == self.state.is_fullscreen {
            return;
        }
        if is_fullscreen {
            self.enter_fullscreen(now);
        } else {
            self.exit_fullscreen();
        }
    }

    pub fn request_toggle(&mut self, host: &mut dyn FullscreenHost) {
        let result = if host.is_fullscreen() {
            host.exit_fullscreen()
        } else {
            host.request_fullscreen()
        };
        if let Err(err) = result {
            warn!("error attempting to toggle fullscreen: {err}");
        }
    }
}

impl Default for FullscreenInactivityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROLS_IDLE)
    }
}
