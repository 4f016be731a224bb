//! Reveal-on-scroll
//!
//! An element switches to `Revealed` the first time enough of it is visible.
//! With `once`, the binding drops its listener after revealing; otherwise it
//! returns to `Hidden` when the element leaves the viewport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::broadcast::{ListenerId, ScrollBroadcaster};
use crate::constants::reveal;
use crate::error::ConfigError;
use crate::fade::validate_unit;
use crate::geometry::{ElementGeometry, ElementRect};
use crate::observable::{BindingState, Observable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction (0..=1) that triggers the reveal
    pub threshold: f64,
    /// Stay revealed and stop listening after the first reveal
    pub once: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: reveal::THRESHOLD,
            once: reveal::ONCE,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_unit("threshold", self.threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// Fraction of the element's height inside the viewport, in [0, 1]
pub fn visible_fraction(rect: ElementRect, viewport_height: f64) -> f64 {
    if !(viewport_height.is_finite() && viewport_height > 0.0) {
        return 0.0;
    }
    let height = rect.height();
    if height <= 0.0 {
        // Zero-height elements are either on screen or not
        return if (0.0..=viewport_height).contains(&rect.top) {
            1.0
        } else {
            0.0
        };
    }
    let overlap = rect.bottom.min(viewport_height) - rect.top.max(0.0);
    (overlap / height).clamp(0.0, 1.0)
}

/// Next state given the current one and the element's visible fraction
fn next_state(current: RevealState, fraction: f64, config: &RevealConfig) -> RevealState {
    match current {
        RevealState::Hidden if fraction > 0.0 && fraction >= config.threshold => {
            RevealState::Revealed
        }
        RevealState::Revealed if !config.once && fraction <= 0.0 => RevealState::Hidden,
        state => state,
    }
}

/// Reveal tracking for one element
pub struct RevealBinding {
    id: ListenerId,
    broadcaster: ScrollBroadcaster,
    state: Observable<RevealState>,
    registered: Arc<AtomicBool>,
}

impl RevealBinding {
    pub fn bind(
        broadcaster: &ScrollBroadcaster,
        element: Arc<dyn ElementGeometry>,
        config: RevealConfig,
    ) -> Self {
        element.prepare();

        let initial = match element.bounding_rect() {
            Ok(rect) => next_state(
                RevealState::Hidden,
                visible_fraction(rect, element.viewport_height()),
                &config,
            ),
            Err(e) => {
                warn!(error = %e, "Reveal binding could not read initial geometry");
                RevealState::Hidden
            }
        };
        let state = Observable::new(initial);
        let id = ListenerId::generate("reveal");
        let registered = Arc::new(AtomicBool::new(false));

        if config.once && initial == RevealState::Revealed {
            debug!(binding = %id, "Element visible at bind, reveal complete");
        } else {
            let published = state.clone();
            let flag = registered.clone();
            let handle = broadcaster.clone();
            let own_id = id.clone();
            registered.store(true, Ordering::Release);
            broadcaster.add_listener(id.clone(), move |_offset| {
                let rect = element.bounding_rect()?;
                let fraction = visible_fraction(rect, element.viewport_height());
                let next = next_state(published.get(), fraction, &config);
                if published.set(next) {
                    debug!(binding = %own_id, state = ?next, fraction, "Reveal state changed");
                }
                if config.once && next == RevealState::Revealed {
                    flag.store(false, Ordering::Release);
                    handle.remove_listener(&own_id);
                }
                Ok(())
            });
        }

        Self {
            id,
            broadcaster: broadcaster.clone(),
            state,
            registered,
        }
    }

    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    pub fn reveal_state(&self) -> RevealState {
        self.state.get()
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal_state() == RevealState::Revealed
    }

    pub fn observable(&self) -> Observable<RevealState> {
        self.state.clone()
    }

    pub fn state(&self) -> BindingState {
        if self.registered.load(Ordering::Acquire) {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    pub fn unbind(&mut self) {
        if self.registered.swap(false, Ordering::AcqRel) {
            self.broadcaster.remove_listener(&self.id);
        }
    }
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::ManualScrollSource;
    use crate::clock::ManualClock;
    use crate::geometry::ScrollOffset;
    use crate::settings::TimingSettings;
    use parking_lot::Mutex;

    struct Element {
        document_top: f64,
        offset: Arc<Mutex<ScrollOffset>>,
    }

    impl ElementGeometry for Element {
        fn bounding_rect(&self) -> anyhow::Result<ElementRect> {
            Ok(ElementRect::at_offset(self.document_top, 100.0, *self.offset.lock()))
        }

        fn viewport_height(&self) -> f64 {
            800.0
        }
    }

    fn setup() -> (ScrollBroadcaster, ManualScrollSource, ManualClock) {
        let mut source = ManualScrollSource::new();
        let clock = ManualClock::new();
        let broadcaster =
            ScrollBroadcaster::new(&mut source, Arc::new(clock.clone()), &TimingSettings::default());
        (broadcaster, source, clock)
    }

    fn frame(
        source: &mut ManualScrollSource,
        clock: &ManualClock,
        broadcaster: &ScrollBroadcaster,
        offset: &Arc<Mutex<ScrollOffset>>,
        to: ScrollOffset,
    ) {
        *offset.lock() = to;
        source.scroll_to(to);
        clock.advance_ms(8);
        broadcaster.tick();
    }

    #[test]
    fn test_visible_fraction() {
        assert_eq!(visible_fraction(ElementRect::new(100.0, 200.0), 800.0), 1.0);
        assert_eq!(visible_fraction(ElementRect::new(750.0, 850.0), 800.0), 0.5);
        assert_eq!(visible_fraction(ElementRect::new(-75.0, 25.0), 800.0), 0.25);
        assert_eq!(visible_fraction(ElementRect::new(900.0, 1000.0), 800.0), 0.0);
        assert_eq!(visible_fraction(ElementRect::new(-200.0, -100.0), 800.0), 0.0);
    }

    #[test]
    fn test_zero_height_element() {
        assert_eq!(visible_fraction(ElementRect::new(10.0, 10.0), 800.0), 1.0);
        assert_eq!(visible_fraction(ElementRect::new(900.0, 900.0), 800.0), 0.0);
    }

    #[test]
    fn test_reveal_once_deregisters() {
        let (broadcaster, mut source, clock) = setup();
        let offset = Arc::new(Mutex::new(0));
        let element = Arc::new(Element {
            document_top: 1200.0,
            offset: offset.clone(),
        });

        let binding = RevealBinding::bind(&broadcaster, element, RevealConfig::default());
        assert!(!binding.is_revealed());
        assert_eq!(binding.state(), BindingState::Bound);

        // top = 790: 10% visible, below threshold
        frame(&mut source, &clock, &broadcaster, &offset, 410);
        assert!(!binding.is_revealed());

        // top = 760: 40% visible
        frame(&mut source, &clock, &broadcaster, &offset, 440);
        assert!(binding.is_revealed());
        assert_eq!(binding.state(), BindingState::Unbound);
        assert_eq!(broadcaster.listener_count(), 0);

        // scrolling back does not hide it
        frame(&mut source, &clock, &broadcaster, &offset, 0);
        assert!(binding.is_revealed());
    }

    #[test]
    fn test_repeating_reveal_hides_when_offscreen() {
        let (broadcaster, mut source, clock) = setup();
        let offset = Arc::new(Mutex::new(0));
        let element = Arc::new(Element {
            document_top: 1200.0,
            offset: offset.clone(),
        });
        let config = RevealConfig {
            threshold: 0.5,
            once: false,
        };
        let binding = RevealBinding::bind(&broadcaster, element, config);

        frame(&mut source, &clock, &broadcaster, &offset, 600);
        assert!(binding.is_revealed());

        // partially visible again: stays revealed
        frame(&mut source, &clock, &broadcaster, &offset, 420);
        assert!(binding.is_revealed());

        frame(&mut source, &clock, &broadcaster, &offset, 0);
        assert!(!binding.is_revealed());
        assert_eq!(binding.state(), BindingState::Bound);
    }

    #[test]
    fn test_visible_at_bind_with_once_never_registers() {
        let (broadcaster, _source, _clock) = setup();
        let element = Arc::new(Element {
            document_top: 100.0,
            offset: Arc::new(Mutex::new(0)),
        });
        let binding = RevealBinding::bind(&broadcaster, element, RevealConfig::default());
        assert!(binding.is_revealed());
        assert_eq!(binding.state(), BindingState::Unbound);
        assert_eq!(broadcaster.listener_count(), 0);
    }

    #[test]
    fn test_drop_deregisters() {
        let (broadcaster, _source, _clock) = setup();
        {
            let element = Arc::new(Element {
                document_top: 5000.0,
                offset: Arc::new(Mutex::new(0)),
            });
            let _binding = RevealBinding::bind(&broadcaster, element, RevealConfig::default());
            assert_eq!(broadcaster.listener_count(), 1);
        }
        assert_eq!(broadcaster.listener_count(), 0);
    }
}
