//! Main application state and event loop

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use scrollfade_core::{
    Clock, ElementGeometry, FadeBinding, ParallaxBinding, ParallaxConfig, RevealBinding,
    ScrollBroadcaster, Settings, SystemClock,
};
use tracing::{debug, info, warn};

use super::components::{render_page, render_scrollbar, render_status_bar, SectionEffects};
use super::host::{SectionGeometry, SharedView, TerminalScrollSource};
use super::page::SECTIONS;
use super::state::LayoutState;
use super::terminal::TerminalGuard;
use super::theme::{rgb, Theme};

/// Rows per mouse wheel notch
const MOUSE_SCROLL_LINES: usize = 3;
/// Hero parallax is capped to a few rows so the title never leaves its section
const MAX_HERO_SHIFT_ROWS: f64 = 4.0;
const STATUS_BAR_HEIGHT: u16 = 1;
const SCROLLBAR_WIDTH: u16 = 1;

/// Scroll effects bound to one page section
struct SectionBindings {
    fade: FadeBinding,
    reveal: RevealBinding,
    parallax: Option<ParallaxBinding>,
}

impl SectionBindings {
    fn effects(&self) -> SectionEffects {
        SectionEffects {
            opacity: self.fade.opacity(),
            revealed: self.reveal.is_revealed(),
            shift: self
                .parallax
                .as_ref()
                .map(|p| p.shift().round() as i32)
                .unwrap_or(0),
        }
    }

    /// Sum of the published values' versions; grows whenever any of them changes
    fn version(&self) -> u64 {
        self.fade.observable().version()
            + self.reveal.observable().version()
            + self
                .parallax
                .as_ref()
                .map(|p| p.observable().version())
                .unwrap_or(0)
    }
}

pub struct App {
    settings: Settings,
    theme: Theme,
    source: TerminalScrollSource,
    broadcaster: ScrollBroadcaster,
    sections: Vec<SectionBindings>,
    layout: LayoutState,
    /// Effect versions as of the last draw
    drawn_version: u64,
    needs_redraw: bool,
    should_quit: bool,
}

impl App {
    pub fn new(settings: Settings, width: u16, height: u16) -> Self {
        Self::with_clock(settings, width, height, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: Settings, width: u16, height: u16, clock: Arc<dyn Clock>) -> Self {
        let mut source = TerminalScrollSource::new(
            SECTIONS,
            width.saturating_sub(SCROLLBAR_WIDTH),
            height.saturating_sub(STATUS_BAR_HEIGHT),
        );
        let broadcaster = ScrollBroadcaster::new(&mut source, clock, &settings.timing);
        let sections = bind_sections(&settings, &broadcaster, source.view());

        info!(
            sections = sections.len(),
            listeners = broadcaster.listener_count(),
            "Page bound"
        );

        Self {
            settings,
            theme: Theme::default(),
            source,
            broadcaster,
            sections,
            layout: LayoutState::new(),
            drawn_version: 0,
            needs_redraw: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let result = self.main_loop(&mut terminal).await;

        terminal.show_cursor()?;
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            self.frame();

            if self.needs_redraw {
                terminal.draw(|f| self.ui(f))?;
                self.needs_redraw = false;
                self.drawn_version = self.effects_version();
            }

            // Poll faster while a scroll or resize is waiting to land
            let poll_timeout = self.poll_timeout();

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => warn!("Terminal event error: {}", e),
                        None => self.should_quit = true,
                    }
                }
                _ = tokio::time::sleep(poll_timeout) => {}
            }

            if self.should_quit {
                break;
            }
        }

        info!(stats = ?self.broadcaster.stats(), "Leaving page");
        Ok(())
    }

    /// Frame boundary: deliver any coalesced scroll, redraw if an effect moved
    fn frame(&mut self) {
        if let Some(report) = self.broadcaster.tick() {
            if report.failed > 0 {
                debug!(offset = report.offset, failed = report.failed, "Broadcast had failures");
            }
        }
        if self.effects_version() != self.drawn_version {
            self.needs_redraw = true;
        }
    }

    fn effects_version(&self) -> u64 {
        self.sections.iter().map(SectionBindings::version).sum()
    }

    fn poll_timeout(&self) -> Duration {
        if self.broadcaster.has_pending_work() {
            self.settings.timing.throttle()
        } else {
            self.settings.timing.frame_interval()
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key(key.code, key.modifiers);
            }
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Resize(width, height) => self.handle_resize(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.source.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.source.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.source.scroll_down(self.layout.page_step());
            }
            KeyCode::PageUp => self.source.scroll_up(self.layout.page_step()),
            KeyCode::Home | KeyCode::Char('g') => self.source.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.source.scroll_to_end(),
            _ => return,
        }
        self.needs_redraw = true;
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.source.scroll_down(MOUSE_SCROLL_LINES),
            MouseEventKind::ScrollUp => self.source.scroll_up(MOUSE_SCROLL_LINES),
            _ => return,
        }
        self.needs_redraw = true;
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        self.source.relayout(
            width.saturating_sub(SCROLLBAR_WIDTH),
            height.saturating_sub(STATUS_BAR_HEIGHT),
        );
        self.broadcaster.handle_resize();
        self.needs_redraw = true;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn ui(&mut self, f: &mut Frame) {
        let area = f.area();
        f.render_widget(Block::default().style(Style::default().bg(rgb(self.theme.bg))), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(SCROLLBAR_WIDTH)])
            .split(rows[0]);
        self.layout.page_area = Some(columns[0]);

        let effects: Vec<SectionEffects> = self.sections.iter().map(SectionBindings::effects).collect();
        let scroll = self.source.scroll().clone();
        let view = self.source.view();
        let view = view.read();

        render_page(
            f.buffer_mut(),
            columns[0],
            &view.layout,
            scroll.offset,
            &effects,
            &self.theme,
        );
        render_scrollbar(
            f.buffer_mut(),
            columns[1],
            scroll.offset,
            view.layout.total_height,
            view.viewport_height as usize,
            rgb(self.theme.scrollbar_thumb),
            rgb(self.theme.scrollbar_track),
        );
        render_status_bar(
            f,
            rows[1],
            &self.theme,
            &self.broadcaster.stats(),
            scroll.offset,
            scroll.max_scroll,
        );
    }
}

/// Bind fade and reveal to every section, plus parallax on hero sections
fn bind_sections(
    settings: &Settings,
    broadcaster: &ScrollBroadcaster,
    view: SharedView,
) -> Vec<SectionBindings> {
    let hero_parallax = ParallaxConfig {
        max_shift: settings.parallax.max_shift.min(MAX_HERO_SHIFT_ROWS),
        ..settings.parallax
    };

    SECTIONS
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let fade_config = settings.fade_preset(section.preset).unwrap_or_else(|e| {
                warn!(section = section.title, error = %e, "Falling back to default fade");
                settings.fade
            });
            let geometry: Arc<dyn ElementGeometry> =
                Arc::new(SectionGeometry::new(index, view.clone()));

            SectionBindings {
                fade: FadeBinding::bind(broadcaster, geometry.clone(), fade_config),
                reveal: RevealBinding::bind(broadcaster, geometry.clone(), settings.reveal),
                parallax: section
                    .hero
                    .then(|| ParallaxBinding::bind(broadcaster, geometry, hero_parallax)),
            }
        })
        .collect()
}
