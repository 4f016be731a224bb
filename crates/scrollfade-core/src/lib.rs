//! Scrollfade Core - scroll broadcasting and scroll-driven element effects
//!
//! This crate provides the host-independent pieces:
//! - One coalescing scroll broadcaster per host, many listeners
//! - Host-driven throttle and debounce
//! - Fade, parallax and reveal bindings over plain element geometry
//! - Settings loading and defaults

pub mod broadcast;
pub mod clock;
pub mod constants;
pub mod driver;
pub mod error;
pub mod fade;
pub mod geometry;
pub mod observable;
pub mod parallax;
pub mod paths;
pub mod reveal;
pub mod settings;
pub mod timing;

// Re-exports for convenience
pub use broadcast::{ListenerId, ScrollBroadcaster, ScrollSource, TickReport};
pub use clock::{Clock, SystemClock};
pub use error::{ConfigError, GeometryError};
pub use fade::{compute_opacity, FadeBinding, FadeConfig};
pub use geometry::{ElementGeometry, ElementRect, ScrollOffset};
pub use observable::{BindingState, Observable};
pub use parallax::{ParallaxBinding, ParallaxConfig};
pub use reveal::{RevealBinding, RevealConfig, RevealState};
pub use settings::Settings;
