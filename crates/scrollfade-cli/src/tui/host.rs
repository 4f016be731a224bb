//! Terminal host adapters
//!
//! Bridges the terminal page to the core crate: the page scroll position is
//! the scroll source, and each laid-out section is an element with geometry.

use std::sync::Arc;

use parking_lot::RwLock;
use scrollfade_core::broadcast::ScrollHandler;
use scrollfade_core::{ElementGeometry, ElementRect, GeometryError, ScrollOffset, ScrollSource};

use super::page::{PageLayout, Section};
use super::state::ScrollState;

/// What the page looks like right now, shared with element geometry
#[derive(Debug, Default)]
pub struct HostView {
    pub offset: ScrollOffset,
    pub viewport_height: u16,
    pub layout: PageLayout,
}

pub type SharedView = Arc<RwLock<HostView>>;

/// Page scrolling exposed as a native scroll source
pub struct TerminalScrollSource {
    sections: &'static [Section],
    view: SharedView,
    scroll: ScrollState,
    handlers: Vec<ScrollHandler>,
}

impl TerminalScrollSource {
    pub fn new(sections: &'static [Section], width: u16, viewport_height: u16) -> Self {
        let view = Arc::new(RwLock::new(HostView {
            offset: 0,
            viewport_height,
            layout: PageLayout::build(sections, width),
        }));
        let mut source = Self {
            sections,
            view,
            scroll: ScrollState::new(),
            handlers: Vec::new(),
        };
        source.apply(|_| {});
        source
    }

    pub fn view(&self) -> SharedView {
        self.view.clone()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.apply(|scroll| scroll.scroll_up(rows));
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.apply(|scroll| scroll.scroll_down(rows));
    }

    pub fn scroll_to_top(&mut self) {
        self.apply(|scroll| scroll.scroll_to_line(0));
    }

    pub fn scroll_to_end(&mut self) {
        self.apply(ScrollState::scroll_to_end);
    }

    /// Re-wrap the page for a new terminal size
    pub fn relayout(&mut self, width: u16, viewport_height: u16) {
        {
            let mut view = self.view.write();
            view.layout = PageLayout::build(self.sections, width);
            view.viewport_height = viewport_height;
        }
        self.apply(|_| {});
    }

    /// Run a scroll operation against fresh bounds, emitting if the offset moved
    fn apply(&mut self, op: impl FnOnce(&mut ScrollState)) {
        let before = self.scroll.offset;
        {
            let view = self.view.read();
            self.scroll
                .update_max_scroll(view.layout.total_height, view.viewport_height);
        }
        op(&mut self.scroll);

        if self.scroll.offset != before {
            self.emit();
        }
    }

    fn emit(&mut self) {
        let offset = ScrollOffset::try_from(self.scroll.offset).unwrap_or(ScrollOffset::MAX);
        self.view.write().offset = offset;
        for handler in &mut self.handlers {
            handler(offset);
        }
    }
}

impl ScrollSource for TerminalScrollSource {
    fn current_offset(&self) -> ScrollOffset {
        self.view.read().offset
    }

    fn subscribe(&mut self, handler: ScrollHandler) {
        self.handlers.push(handler);
    }
}

/// One page section as seen by scroll effects
pub struct SectionGeometry {
    index: usize,
    view: SharedView,
}

impl SectionGeometry {
    pub fn new(index: usize, view: SharedView) -> Self {
        Self { index, view }
    }
}

impl ElementGeometry for SectionGeometry {
    fn bounding_rect(&self) -> anyhow::Result<ElementRect> {
        let view = self.view.read();
        if view.viewport_height == 0 {
            return Err(GeometryError::ViewportUnavailable.into());
        }
        let section = view
            .layout
            .sections
            .get(self.index)
            .ok_or_else(|| GeometryError::Detached(format!("section {}", self.index)))?;
        Ok(ElementRect::at_offset(
            section.top as f64,
            section.height() as f64,
            view.offset,
        ))
    }

    fn viewport_height(&self) -> f64 {
        self.view.read().viewport_height as f64
    }
}
