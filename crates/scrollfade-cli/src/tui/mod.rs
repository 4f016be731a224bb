//! Terminal demo page
//!
//! A scrolling agency page whose sections fade, reveal and drift as the
//! terminal scrolls, all driven by one shared broadcaster.

mod app;
mod components;
mod host;
mod page;
mod state;
mod terminal;
mod theme;

pub use app::App;
pub use terminal::install_panic_hook;
