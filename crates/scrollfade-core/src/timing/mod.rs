//! Host-driven rate limiting
//!
//! Neither helper owns a timer: the host passes the current instant to
//! `trigger` and `poll` from its own loop.

mod debounce;
mod throttle;

pub use debounce::Debounce;
pub use throttle::Throttle;
