//! Page scrollbar
//!
//! 1-char wide: ░ track with a █ thumb sized to the visible fraction.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Thumb start row and length within a track of `height` rows
pub fn thumb_span(height: usize, offset: usize, total: usize, visible: usize) -> Option<(usize, usize)> {
    if total <= visible || height == 0 {
        return None;
    }

    // Minimum 2 rows so the thumb stays visible on long pages
    let thumb_size = ((visible as f32 / total as f32) * height as f32)
        .max(2.0)
        .min(height as f32)
        .round() as usize;

    let max_offset = total - visible;
    let thumb_pos = ((offset.min(max_offset) as f32 / max_offset as f32)
        * height.saturating_sub(thumb_size) as f32)
        .round() as usize;

    Some((thumb_pos, thumb_size))
}

pub fn render_scrollbar(
    buf: &mut Buffer,
    area: Rect,
    offset: usize,
    total: usize,
    visible: usize,
    thumb_color: Color,
    track_color: Color,
) {
    // Clear first so no stale glyphs remain when the page stops overflowing
    for y in area.top()..area.bottom() {
        if let Some(cell) = buf.cell_mut((area.x, y)) {
            cell.set_char(' ');
            cell.set_fg(Color::Reset);
        }
    }

    let Some((thumb_pos, thumb_size)) = thumb_span(area.height as usize, offset, total, visible)
    else {
        return;
    };

    for row in 0..area.height as usize {
        let is_thumb = row >= thumb_pos && row < thumb_pos + thumb_size;
        let (ch, color) = if is_thumb {
            ('█', thumb_color)
        } else {
            ('░', track_color)
        };
        if let Some(cell) = buf.cell_mut((area.x, area.y + row as u16)) {
            cell.set_char(ch).set_fg(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_thumb_when_content_fits() {
        assert_eq!(thumb_span(10, 0, 8, 10), None);
    }

    #[test]
    fn test_thumb_travels_full_track() {
        let (top, size) = thumb_span(20, 0, 100, 20).unwrap();
        assert_eq!(top, 0);
        assert_eq!(size, 4);

        let (bottom, size) = thumb_span(20, 80, 100, 20).unwrap();
        assert_eq!(bottom + size, 20);
    }

    #[test]
    fn test_render_draws_track_and_thumb() {
        let area = Rect::new(0, 0, 1, 10);
        let mut buf = Buffer::empty(area);
        render_scrollbar(&mut buf, area, 0, 50, 10, Color::White, Color::DarkGray);

        assert_eq!(buf[(0, 0)].symbol(), "█");
        assert_eq!(buf[(0, 9)].symbol(), "░");
    }
}
