//! Status bar component - bottom bar with scroll position and broadcast counters

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scrollfade_core::broadcast::BroadcastStats;
use unicode_width::UnicodeWidthStr;

use crate::tui::theme::{rgb, Theme};

const KEY_HINTS: &str = "↑↓ scroll  PgUp/PgDn page  Home/End  q quit ";

/// Left-hand status text
pub fn status_text(stats: &BroadcastStats, offset: usize, max_scroll: usize) -> String {
    let percent = if max_scroll == 0 {
        100
    } else {
        offset * 100 / max_scroll
    };
    let mut text = format!(
        " {offset}/{max_scroll} ({percent:>3}%) │ {} listeners │ {} broadcasts",
        stats.listeners, stats.broadcasts
    );
    if stats.failures > 0 {
        text.push_str(&format!(" │ {} failures", stats.failures));
    }
    text
}

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    stats: &BroadcastStats,
    offset: usize,
    max_scroll: usize,
) {
    let bg = Paragraph::new("").style(Style::default().bg(rgb(theme.status_bg)));
    f.render_widget(bg, area);

    let left = status_text(stats, offset, max_scroll);
    let left_width = left.width();
    let hints_width = KEY_HINTS.width();

    let mut spans = vec![Span::styled(left, Style::default().fg(rgb(theme.dim)))];
    // Hints only when they fit beside the counters
    if left_width + hints_width < area.width as usize {
        let pad = area.width as usize - left_width - hints_width;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(KEY_HINTS, Style::default().fg(rgb(theme.dim))));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(rgb(theme.status_bg))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(failures: u64) -> BroadcastStats {
        BroadcastStats {
            native_subscriptions: 1,
            listeners: 14,
            broadcasts: 3,
            failures,
            last_offset: 10,
        }
    }

    #[test]
    fn test_status_shows_position_and_counts() {
        let text = status_text(&stats(0), 10, 40);
        assert!(text.contains("10/40"));
        assert!(text.contains("25%"));
        assert!(text.contains("14 listeners"));
        assert!(!text.contains("failures"));
    }

    #[test]
    fn test_failures_only_shown_when_present() {
        assert!(status_text(&stats(2), 0, 0).contains("2 failures"));
    }
}
