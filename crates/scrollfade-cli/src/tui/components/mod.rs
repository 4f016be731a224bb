//! Reusable UI components

mod page_view;
mod scrollbars;
mod status_bar;

pub use page_view::{render_page, SectionEffects};
pub use scrollbars::render_scrollbar;
pub use status_bar::render_status_bar;
