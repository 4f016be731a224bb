//! Trailing debounce
//!
//! Every trigger restarts the settle delay; the wrapped function runs once the
//! input has been quiet for the full delay.

use std::time::{Duration, Instant};

/// Wraps `f` so it runs only after triggers stop for `delay`
pub struct Debounce<F> {
    f: F,
    delay: Duration,
    deadline: Option<Instant>,
}

impl<F: FnMut()> Debounce<F> {
    pub fn new(delay: Duration, f: F) -> Self {
        Self {
            f,
            delay,
            deadline: None,
        }
    }

    /// Restart the settle delay
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Run `f` if the input has settled. Returns true if `f` ran.
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

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl<F> std::fmt::Debug for Debounce<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.delay)
            .field("pending", &self.deadline.is_some())
            .finish()
    }
}
