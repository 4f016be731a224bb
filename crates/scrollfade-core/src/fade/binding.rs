//! Per-element fade binding
//!
//! Ties one element to the broadcaster and republishes its opacity. The scroll
//! offset passed to the listener is only a change signal; geometry is re-read
//! from the element on every tick.

use std::sync::Arc;

use tracing::{debug, warn};

use super::calculator::compute_opacity;
use super::config::FadeConfig;
use crate::broadcast::{ListenerId, ScrollBroadcaster};
use crate::geometry::ElementGeometry;
use crate::observable::{BindingState, Observable};

/// Fade tracking for one element
///
/// Registered on `bind`, deregistered on `unbind` or drop.
pub struct FadeBinding {
    id: ListenerId,
    broadcaster: ScrollBroadcaster,
    opacity: Observable<f64>,
    state: BindingState,
}

impl FadeBinding {
    pub fn bind(
        broadcaster: &ScrollBroadcaster,
        element: Arc<dyn ElementGeometry>,
        config: FadeConfig,
    ) -> Self {
        element.prepare();

        // Published before the first scroll so first paint is already faded
        let initial = match element.bounding_rect() {
            Ok(rect) => compute_opacity(rect, element.viewport_height(), &config),
            Err(e) => {
                warn!(error = %e, "Fade binding could not read initial geometry");
                config.initial_opacity
            }
        };
        let opacity = Observable::new(initial);

        let id = ListenerId::generate("fade");
        let published = opacity.clone();
        broadcaster.add_listener(id.clone(), move |_offset| {
            let rect = element.bounding_rect()?;
            published.set(compute_opacity(rect, element.viewport_height(), &config));
            Ok(())
        });

        debug!(binding = %id, opacity = initial, "Fade binding bound");

        Self {
            id,
            broadcaster: broadcaster.clone(),
            opacity,
            state: BindingState::Bound,
        }
    }

    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Current opacity in [0, 1]
    pub fn opacity(&self) -> f64 {
        self.opacity.get()
    }

    /// Handle for a view that outlives borrow scopes of the binding
    pub fn observable(&self) -> Observable<f64> {
        self.opacity.clone()
    }

    /// Stop tracking scroll. The last opacity stays readable.
    pub fn unbind(&mut self) {
        if self.state == BindingState::Unbound {
            return;
        }
        self.broadcaster.remove_listener(&self.id);
        self.state = BindingState::Unbound;
        debug!(binding = %self.id, opacity = self.opacity.get(), "Fade binding unbound");
    }
}

impl Drop for FadeBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl std::fmt::Debug for FadeBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FadeBinding")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("opacity", &self.opacity.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::ManualScrollSource;
    use crate::clock::ManualClock;
    use crate::error::GeometryError;
    use crate::geometry::{ElementRect, ScrollOffset};
    use crate::settings::TimingSettings;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Element laid out at a fixed document position, read against a shared offset
    struct TestElement {
        document_top: f64,
        height: f64,
        viewport: f64,
        offset: Arc<Mutex<ScrollOffset>>,
        detached: AtomicBool,
        prepared: AtomicUsize,
    }

    impl TestElement {
        fn new(document_top: f64, height: f64, offset: Arc<Mutex<ScrollOffset>>) -> Arc<Self> {
            Arc::new(Self {
                document_top,
                height,
                viewport: 800.0,
                offset,
                detached: AtomicBool::new(false),
                prepared: AtomicUsize::new(0),
            })
        }
    }

    impl ElementGeometry for TestElement {
        fn bounding_rect(&self) -> anyhow::Result<ElementRect> {
            if self.detached.load(Ordering::SeqCst) {
                return Err(GeometryError::Detached("test".into()).into());
            }
            Ok(ElementRect::at_offset(
                self.document_top,
                self.height,
                *self.offset.lock(),
            ))
        }

        fn viewport_height(&self) -> f64 {
            self.viewport
        }

        fn prepare(&self) {
            self.prepared.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Harness {
        broadcaster: ScrollBroadcaster,
        source: ManualScrollSource,
        clock: ManualClock,
        offset: Arc<Mutex<ScrollOffset>>,
    }

    impl Harness {
        fn new() -> Self {
            let mut source = ManualScrollSource::new();
            let clock = ManualClock::new();
            let broadcaster = ScrollBroadcaster::new(
                &mut source,
                Arc::new(clock.clone()),
                &TimingSettings::default(),
            );
            Self {
                broadcaster,
                source,
                clock,
                offset: Arc::new(Mutex::new(0)),
            }
        }

        fn scroll_and_frame(&mut self, offset: ScrollOffset) {
            *self.offset.lock() = offset;
            self.source.scroll_to(offset);
            self.clock.advance_ms(8);
            self.broadcaster.tick();
        }
    }

    #[test]
    fn test_initial_opacity_published_at_bind() {
        let harness = Harness::new();
        let element = TestElement::new(400.0, 200.0, harness.offset.clone());

        let binding = FadeBinding::bind(&harness.broadcaster, element.clone(), FadeConfig::default());

        assert!((binding.opacity() - 0.05).abs() < 1e-9);
        assert_eq!(binding.state(), BindingState::Bound);
        assert_eq!(element.prepared.load(Ordering::SeqCst), 1);
        assert!(harness.broadcaster.contains_listener(binding.id()));
    }

    #[test]
    fn test_opacity_tracks_scroll() {
        let mut harness = Harness::new();
        let element = TestElement::new(400.0, 200.0, harness.offset.clone());
        let binding = FadeBinding::bind(&harness.broadcaster, element, FadeConfig::default());

        // top = 100 -> exit factor 0.75 dominates
        harness.scroll_and_frame(300);
        assert!((binding.opacity() - 0.75).abs() < 1e-9);

        // fully above
        harness.scroll_and_frame(700);
        assert_eq!(binding.opacity(), 0.05);
    }

    #[test]
    fn test_unbind_freezes_opacity_and_is_idempotent() {
        let mut harness = Harness::new();
        let element = TestElement::new(400.0, 200.0, harness.offset.clone());
        let mut binding = FadeBinding::bind(&harness.broadcaster, element, FadeConfig::default());

        harness.scroll_and_frame(300);
        binding.unbind();
        binding.unbind();
        assert_eq!(binding.state(), BindingState::Unbound);
        assert_eq!(harness.broadcaster.listener_count(), 0);

        harness.scroll_and_frame(700);
        assert!((binding.opacity() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_drop_deregisters() {
        let harness = Harness::new();
        {
            let element = TestElement::new(0.0, 100.0, harness.offset.clone());
            let _binding = FadeBinding::bind(&harness.broadcaster, element, FadeConfig::default());
            assert_eq!(harness.broadcaster.listener_count(), 1);
        }
        assert_eq!(harness.broadcaster.listener_count(), 0);
    }

    #[test]
    fn test_bindings_get_distinct_ids() {
        let harness = Harness::new();
        let a = FadeBinding::bind(
            &harness.broadcaster,
            TestElement::new(0.0, 100.0, harness.offset.clone()),
            FadeConfig::default(),
        );
        let b = FadeBinding::bind(
            &harness.broadcaster,
            TestElement::new(0.0, 100.0, harness.offset.clone()),
            FadeConfig::default(),
        );
        assert_ne!(a.id(), b.id());
        assert_eq!(harness.broadcaster.listener_count(), 2);
    }

    #[test]
    fn test_detached_element_keeps_last_opacity() {
        let mut harness = Harness::new();
        let element = TestElement::new(400.0, 200.0, harness.offset.clone());
        let binding = FadeBinding::bind(&harness.broadcaster, element.clone(), FadeConfig::default());

        harness.scroll_and_frame(300);
        element.detached.store(true, Ordering::SeqCst);
        harness.scroll_and_frame(700);

        assert!((binding.opacity() - 0.75).abs() < 1e-9);
        assert_eq!(harness.broadcaster.stats().failures, 1);
    }
}
