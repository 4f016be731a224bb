//! Layout State - cached areas from the last render
//!
//! Updated each frame during rendering, used to size scroll steps.

use ratatui::layout::Rect;

#[derive(Debug, Default)]
pub struct LayoutState {
    /// Page content area
    pub page_area: Option<Rect>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows to move for a page-up/page-down, leaving two rows of context
    pub fn page_step(&self) -> usize {
        self.page_area
            .map(|area| area.height.saturating_sub(2).max(1) as usize)
            .unwrap_or(10)
    }
}
