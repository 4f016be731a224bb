//! Native scroll event seam
//!
//! A host exposes its scroll events through [`ScrollSource`]. The broadcaster
//! is the only subscriber; bindings never touch the source directly.

use crate::geometry::ScrollOffset;

/// Callback the host invokes on every native scroll event
pub type ScrollHandler = Box<dyn FnMut(ScrollOffset) + Send>;

/// Host scroll event channel
pub trait ScrollSource {
    /// Scroll offset right now
    fn current_offset(&self) -> ScrollOffset;

    /// Register a handler for native scroll events
    fn subscribe(&mut self, handler: ScrollHandler);
}

/// In-memory scroll source driven by explicit `scroll_to` calls
///
/// Useful for hosts that already own a scroll position (and for tests).
#[derive(Default)]
pub struct ManualScrollSource {
    offset: ScrollOffset,
    handlers: Vec<ScrollHandler>,
}

impl ManualScrollSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: ScrollOffset) -> Self {
        Self {
            offset,
            handlers: Vec::new(),
        }
    }

    /// Number of native subscriptions taken on this source
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Move to `offset` and emit a scroll event
    pub fn scroll_to(&mut self, offset: ScrollOffset) {
        self.offset = offset;
        for handler in &mut self.handlers {
            handler(offset);
        }
    }

    /// Scroll relative to the current position, saturating at zero
    pub fn scroll_by(&mut self, delta: i64) {
        let next = (i64::from(self.offset) + delta).clamp(0, i64::from(ScrollOffset::MAX));
        self.scroll_to(next as ScrollOffset);
    }
}

impl ScrollSource for ManualScrollSource {
    fn current_offset(&self) -> ScrollOffset {
        self.offset
    }

    fn subscribe(&mut self, handler: ScrollHandler) {
        self.handlers.push(handler);
    }
}
