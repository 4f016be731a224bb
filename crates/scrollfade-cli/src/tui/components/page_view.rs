//! Page renderer
//!
//! Draws the visible slice of the laid-out page with each section's current
//! scroll effects applied.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::tui::page::{LineKind, PageLayout};
use crate::tui::theme::Theme;

/// Current effect values for one section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionEffects {
    pub opacity: f64,
    pub revealed: bool,
    /// Vertical shift in rows, positive moves down
    pub shift: i32,
}

impl Default for SectionEffects {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            revealed: true,
            shift: 0,
        }
    }
}

pub fn render_page(
    buf: &mut Buffer,
    area: Rect,
    layout: &PageLayout,
    offset: usize,
    effects: &[SectionEffects],
    theme: &Theme,
) {
    let left = area.x + area.width.saturating_sub(layout.column_width) / 2;
    let max_width = area.right().saturating_sub(left) as usize;

    for (index, section) in layout.sections.iter().enumerate() {
        let effect = effects.get(index).copied().unwrap_or_default();

        for (line_index, line) in section.lines.iter().enumerate() {
            let style = match line.kind {
                LineKind::Blank => continue,
                // Body copy stays hidden until the section is revealed
                LineKind::Body if !effect.revealed => continue,
                LineKind::Kicker => Style::default().fg(theme.faded(theme.accent, effect.opacity)),
                LineKind::Title => Style::default()
                    .fg(theme.faded(theme.heading, effect.opacity))
                    .add_modifier(Modifier::BOLD),
                LineKind::Body => Style::default().fg(theme.faded(theme.text, effect.opacity)),
            };

            let doc_row = (section.top + line_index) as i64 + i64::from(effect.shift);
            let screen_row = doc_row - offset as i64;
            if screen_row < 0 || screen_row >= i64::from(area.height) {
                continue;
            }

            buf.set_stringn(left, area.y + screen_row as u16, &line.text, max_width, style);
        }
    }
}
