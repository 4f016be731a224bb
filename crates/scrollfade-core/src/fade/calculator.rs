//! Visibility-driven opacity
//!
//! Two partial curves combined with `min`:
//! - entry: rises as the element climbs from the bottom edge
//! - exit: falls as the element's top approaches the exit band
//!
//! Whichever is more restrictive wins at any scroll position.

use super::config::FadeConfig;
use crate::geometry::ElementRect;

/// The two partial factors for an element that is at least partly visible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeFactors {
    pub entry: f64,
    pub exit: f64,
}

impl FadeFactors {
    /// Combined opacity, floored at `min_opacity`
    pub fn opacity(&self, min_opacity: f64) -> f64 {
        self.entry.min(self.exit).max(min_opacity)
    }
}

/// Where an element sits relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Fully scrolled past, above the viewport
    Above,
    /// At least partly visible
    Visible,
    /// Not yet entered, below the viewport
    Below,
}

pub fn visibility(rect: ElementRect, viewport_height: f64) -> Visibility {
    if rect.bottom < 0.0 {
        Visibility::Above
    } else if rect.top > viewport_height {
        Visibility::Below
    } else {
        Visibility::Visible
    }
}

/// Entry and exit factors, regardless of visibility
pub fn fade_factors(rect: ElementRect, viewport_height: f64, config: &FadeConfig) -> FadeFactors {
    let entry_ratio = (viewport_height - rect.top) / (viewport_height * config.fade_in_point);
    let entry = (entry_ratio * config.fade_in_duration).clamp(0.0, 1.0);

    let exit_ratio = rect.top / (viewport_height * config.fade_out_point);
    let exit = config.min_opacity.max(1.0 - exit_ratio.max(0.0));

    FadeFactors { entry, exit }
}

/// Opacity for an element at `rect` in a viewport of `viewport_height`
///
/// A non-positive or non-finite viewport yields `initial_opacity`.
pub fn compute_opacity(rect: ElementRect, viewport_height: f64, config: &FadeConfig) -> f64 {
    if !(viewport_height.is_finite() && viewport_height > 0.0) {
        return config.initial_opacity;
    }

    match visibility(rect, viewport_height) {
        Visibility::Above => config.min_opacity,
        Visibility::Below => config.initial_opacity,
        Visibility::Visible => {
            fade_factors(rect, viewport_height, config).opacity(config.min_opacity)
        }
    }
}
