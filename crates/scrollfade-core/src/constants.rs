//! Application constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

use std::time::Duration;

/// Scroll broadcast timing
pub mod timing {
    use super::*;

    /// Throttle window between a scroll event and the frame request it produces
    pub const SCROLL_THROTTLE: Duration = Duration::from_millis(8);

    /// Settle delay before a viewport resize forces a broadcast
    pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

    /// Frame interval for hosts driven by [`crate::driver::FrameDriver`] (~60fps)
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
}

/// Fade tuning defaults
///
/// These values match the visual tuning the fade curve was built against.
pub mod fade {
    /// Fraction of the viewport height over which an element fades out near the top
    pub const FADE_OUT_POINT: f64 = 0.5;

    /// Fraction of the viewport height over which an element fades in from the bottom
    pub const FADE_IN_POINT: f64 = 0.6;

    /// Carried for configuration compatibility; the exit curve does not scale by it
    pub const FADE_OUT_DURATION: f64 = 1.5;

    /// Multiplier applied to the entry ratio
    pub const FADE_IN_DURATION: f64 = 1.0;

    /// Opacity of an element that has not yet entered the viewport
    pub const INITIAL_OPACITY: f64 = 0.0;

    /// Floor for an element that is visible or has scrolled past
    pub const MIN_OPACITY: f64 = 0.05;
}

/// Reveal-on-scroll defaults
pub mod reveal {
    /// Visible fraction of an element required before it reveals
    pub const THRESHOLD: f64 = 0.15;

    /// Whether a revealed element stays revealed
    pub const ONCE: bool = true;
}

/// Parallax defaults
pub mod parallax {
    /// Shift per pixel of distance from the viewport centre
    pub const SPEED: f64 = 0.2;

    /// Largest shift in either direction
    pub const MAX_SHIFT: f64 = 120.0;
}

/// Paths and file names
pub mod paths {
    /// Config directory name
    pub const CONFIG_DIR_NAME: &str = ".scrollfade";

    /// Settings file name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Logs subdirectory name
    pub const LOGS_DIR_NAME: &str = "logs";
}
