//! Scroll broadcasting
//!
//! A single subscription to the host's scroll events, coalesced to at most one
//! broadcast per frame and fanned out to registered listeners.

mod broadcaster;
mod listener;
mod source;


pub use broadcaster::{BroadcastStats, ScrollBroadcaster, TickReport};
pub use listener::{ListenerFn, ListenerId};
pub use source::{ManualScrollSource, ScrollHandler, ScrollSource};
