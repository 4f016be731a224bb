//! Scroll-driven parallax
//!
//! Elements drift against the scroll direction in proportion to how far their
//! centre sits from the viewport centre.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::broadcast::{ListenerId, ScrollBroadcaster};
use crate::constants::parallax;
use crate::error::ConfigError;
use crate::geometry::{ElementGeometry, ElementRect};
use crate::observable::{BindingState, Observable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Shift per unit of distance from the viewport centre
    pub speed: f64,
    /// Largest shift in either direction
    #[serde(alias = "maxShift")]
    pub max_shift: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            speed: parallax::SPEED,
            max_shift: parallax::MAX_SHIFT,
        }
    }
}

impl ParallaxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "speed",
                value: self.speed,
                reason: "must be a finite number",
            });
        }
        if !(self.max_shift.is_finite() && self.max_shift >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "max_shift",
                value: self.max_shift,
                reason: "must be zero or greater",
            });
        }
        Ok(())
    }
}

/// Vertical shift for an element; positive moves it down
pub fn compute_parallax_shift(rect: ElementRect, viewport_height: f64, config: &ParallaxConfig) -> f64 {
    if !(viewport_height.is_finite() && viewport_height > 0.0) {
        return 0.0;
    }
    let distance = rect.center() - viewport_height / 2.0;
    (distance * config.speed).clamp(-config.max_shift, config.max_shift)
}

/// Parallax tracking for one element
pub struct ParallaxBinding {
    id: ListenerId,
    broadcaster: ScrollBroadcaster,
    shift: Observable<f64>,
    state: BindingState,
}

impl ParallaxBinding {
    pub fn bind(
        broadcaster: &ScrollBroadcaster,
        element: Arc<dyn ElementGeometry>,
        config: ParallaxConfig,
    ) -> Self {
        element.prepare();

        let initial = match element.bounding_rect() {
            Ok(rect) => compute_parallax_shift(rect, element.viewport_height(), &config),
            Err(e) => {
                warn!(error = %e, "Parallax binding could not read initial geometry");
                0.0
            }
        };
        let shift = Observable::new(initial);

        let id = ListenerId::generate("parallax");
        let published = shift.clone();
        broadcaster.add_listener(id.clone(), move |_offset| {
            let rect = element.bounding_rect()?;
            published.set(compute_parallax_shift(rect, element.viewport_height(), &config));
            Ok(())
        });
        debug!(binding = %id, shift = initial, "Parallax binding bound");

        Self {
            id,
            broadcaster: broadcaster.clone(),
            shift,
            state: BindingState::Bound,
        }
    }

    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn shift(&self) -> f64 {
        self.shift.get()
    }

    pub fn observable(&self) -> Observable<f64> {
        self.shift.clone()
    }

    pub fn unbind(&mut self) {
        if self.state == BindingState::Bound {
            self.broadcaster.remove_listener(&self.id);
            self.state = BindingState::Unbound;
        }
    }
}

impl Drop for ParallaxBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}
