//! Scroll State - page scroll position and bounds
//!
//! Owns the page offset and clamps every movement to the scrollable range.

/// Scroll position of the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Current scroll offset in rows (0 = top, max = bottom)
    pub offset: usize,
    /// Maximum scroll offset for bounds checking
    pub max_scroll: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Core Scroll Operations
    // =========================================================================

    /// Scroll up by the given amount
    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
    }

    /// Scroll down by the given amount
    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = self.offset.saturating_add(amount).min(self.max_scroll);
    }

    /// Scroll to a specific line
    pub fn scroll_to_line(&mut self, line: usize) {
        self.offset = line.min(self.max_scroll);
    }

    /// Jump to the bottom
    pub fn scroll_to_end(&mut self) {
        self.offset = self.max_scroll;
    }

    // =========================================================================
    // Max Scroll Updates
    // =========================================================================

    /// Update the maximum scroll value based on total lines and viewport height
    pub fn update_max_scroll(&mut self, total_lines: usize, viewport_height: u16) {
        self.max_scroll = total_lines.saturating_sub(viewport_height as usize);

        // Clamp current offset to valid range
        if self.offset > self.max_scroll {
            self.offset = self.max_scroll;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut scroll = ScrollState::new();
        scroll.update_max_scroll(100, 40);
        assert_eq!(scroll.max_scroll, 60);

        scroll.scroll_down(80);
        assert_eq!(scroll.offset, 60);

        scroll.scroll_up(200);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::new();
        scroll.update_max_scroll(100, 40);
        scroll.scroll_to_end();

        scroll.update_max_scroll(50, 40);
        assert_eq!(scroll.offset, 10);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut scroll = ScrollState::new();
        scroll.update_max_scroll(20, 40);
        assert_eq!(scroll.max_scroll, 0);
        scroll.scroll_to_line(5);
        assert_eq!(scroll.offset, 0);
    }
}
