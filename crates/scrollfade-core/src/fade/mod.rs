//! Scroll-driven fade
//!
//! Configuration, the pure opacity calculation, and the binding that keeps an
//! element's opacity current as the page scrolls.

mod binding;
mod calculator;
mod config;

pub use binding::FadeBinding;
pub use calculator::{compute_opacity, fade_factors, visibility, FadeFactors, Visibility};
pub use config::FadeConfig;

pub(crate) use config::unit as validate_unit;
