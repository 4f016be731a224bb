//! App State Components
//!
//! Scroll position and cached layout for the page view.

mod layout;
mod scroll;

pub use layout::LayoutState;
pub use scroll::ScrollState;
