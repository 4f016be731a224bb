//! Element geometry as seen by scroll-driven bindings
//!
//! Coordinates are viewport-relative: `top < 0` means the element's top edge is
//! above the viewport, `top > viewport_height` means it has not entered yet.

use anyhow::Result;

/// Vertical scroll distance from the top of the document, in pixels (or rows)
pub type ScrollOffset = u32;

/// Vertical extent of an element relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub bottom: f64,
}

impl ElementRect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Rect for an element laid out at `document_top` with `height`, seen at `offset`
    pub fn at_offset(document_top: f64, height: f64, offset: ScrollOffset) -> Self {
        let top = document_top - f64::from(offset);
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Vertical centre
    pub fn center(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Host-side view of one bound element
///
/// Implemented by the host for each element a binding tracks. Queries are
/// read-only; `prepare` is the one place a host may adjust the element so the
/// other queries are well-defined.
pub trait ElementGeometry: Send + Sync {
    /// Current viewport-relative bounding rect
    fn bounding_rect(&self) -> Result<ElementRect>;

    /// Current viewport height
    fn viewport_height(&self) -> f64;

    /// One-time normalization at bind time
    fn prepare(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_at_offset() {
        let rect = ElementRect::at_offset(1000.0, 200.0, 700);
        assert_eq!(rect.top, 300.0);
        assert_eq!(rect.bottom, 500.0);
        assert_eq!(rect.height(), 200.0);
        assert_eq!(rect.center(), 400.0);
    }

    #[test]
    fn test_rect_above_viewport_is_negative() {
        let rect = ElementRect::at_offset(100.0, 50.0, 400);
        assert!(rect.bottom < 0.0);
    }
}
