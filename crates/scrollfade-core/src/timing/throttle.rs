//! Leading-schedule throttle
//!
//! The first trigger in an idle throttle arms a window; triggers while the
//! window is pending are dropped. When the window elapses the wrapped function
//! runs once and the throttle returns to idle. No trailing call is queued.

use std::time::{Duration, Instant};

/// Wraps `f` so it runs at most once per window
pub struct Throttle<F> {
    f: F,
    window: Duration,
    /// When the pending call becomes due (`None` = idle)
    deadline: Option<Instant>,
}

impl<F: FnMut()> Throttle<F> {
    pub fn new(window: Duration, f: F) -> Self {
        Self {
            f,
            window,
            deadline: None,
        }
    }

    /// Schedule `f` if nothing is pending. Returns true if this call armed the window.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + self.window);
        true
    }

    /// Run `f` if the pending window has elapsed. Returns true if `f` ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(due) if now >= due => {
                self.deadline = None;
                (self.f)();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop a pending call without running it
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<F> std::fmt::Debug for Throttle<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("window", &self.window)
            .field("pending", &self.deadline.is_some())
            .finish()
    }
}
