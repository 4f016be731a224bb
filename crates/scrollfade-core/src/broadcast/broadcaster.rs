//! Scroll Broadcaster
//!
//! One native scroll subscription fanned out to any number of listeners:
//! - Scroll events record the latest offset and arm the throttle
//! - An elapsed throttle window requests a frame
//! - The next `tick` delivers one broadcast with the most recent offset
//!
//! Intermediate offsets between frames are dropped; every listener in a tick
//! sees the same value.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use anyhow::Result;
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, error, trace, warn};

use super::listener::{ListenerFn, ListenerId};
use super::source::ScrollSource;
use crate::clock::Clock;
use crate::geometry::ScrollOffset;
use crate::settings::TimingSettings;
use crate::timing::{Debounce, Throttle};

type SharedListener = Arc<Mutex<Box<ListenerFn>>>;
type FrameRequest = Box<dyn FnMut() + Send>;

/// Outcome of a tick that delivered a broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Offset every listener received
    pub offset: ScrollOffset,
    /// Listeners that returned Ok
    pub delivered: usize,
    /// Listeners that returned Err or panicked
    pub failed: usize,
}

/// Counters for diagnostics and status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastStats {
    pub native_subscriptions: usize,
    pub listeners: usize,
    pub broadcasts: u64,
    pub failures: u64,
    pub last_offset: ScrollOffset,
}

/// Throttle and resize debounce, both ending in a frame request
struct FrameScheduler {
    scroll: Throttle<FrameRequest>,
    resize: Debounce<FrameRequest>,
}

struct Shared {
    clock: Arc<dyn Clock>,
    listeners: Mutex<IndexMap<ListenerId, SharedListener>>,
    scheduler: Mutex<FrameScheduler>,
    frame_requested: Arc<AtomicBool>,
    last_offset: AtomicU32,
    native_subscriptions: AtomicUsize,
    broadcasts: AtomicU64,
    failures: AtomicU64,
}

impl Shared {
    fn record_scroll(&self, offset: ScrollOffset) {
        self.last_offset.store(offset, Ordering::Release);
        let armed = self.scheduler.lock().scroll.trigger(self.clock.now());
        trace!(offset, armed, "Scroll event");
    }
}

/// Process-wide scroll publisher
///
/// Cheap to clone; all clones share one registry and one native subscription.
/// Construct it once at the composition root and pass it to bindings.
#[derive(Clone)]
pub struct ScrollBroadcaster {
    shared: Arc<Shared>,
}

impl ScrollBroadcaster {
    /// Subscribe to `source` and start tracking its offset
    pub fn new(
        source: &mut dyn ScrollSource,
        clock: Arc<dyn Clock>,
        timing: &TimingSettings,
    ) -> Self {
        let frame_requested = Arc::new(AtomicBool::new(false));

        let scroll_flag = frame_requested.clone();
        let resize_flag = frame_requested.clone();
        let scheduler = FrameScheduler {
            scroll: Throttle::new(
                timing.throttle(),
                Box::new(move || scroll_flag.store(true, Ordering::Release)),
            ),
            resize: Debounce::new(
                timing.resize_debounce(),
                Box::new(move || resize_flag.store(true, Ordering::Release)),
            ),
        };

        let shared = Arc::new(Shared {
            clock,
            listeners: Mutex::new(IndexMap::new()),
            scheduler: Mutex::new(scheduler),
            frame_requested,
            last_offset: AtomicU32::new(source.current_offset()),
            native_subscriptions: AtomicUsize::new(0),
            broadcasts: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        });

        let weak: Weak<Shared> = Arc::downgrade(&shared);
        source.subscribe(Box::new(move |offset| {
            if let Some(shared) = weak.upgrade() {
                shared.record_scroll(offset);
            }
        }));
        shared.native_subscriptions.fetch_add(1, Ordering::Relaxed);

        debug!(
            throttle_ms = timing.throttle_ms,
            resize_debounce_ms = timing.resize_debounce_ms,
            offset = source.current_offset(),
            "Scroll broadcaster attached"
        );

        Self { shared }
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Register `callback` under `id`, replacing any existing entry
    ///
    /// Returns true if an entry was replaced. A replaced entry keeps its slot
    /// in iteration order.
    pub fn add_listener<F>(&self, id: ListenerId, callback: F) -> bool
    where
        F: FnMut(ScrollOffset) -> Result<()> + Send + 'static,
    {
        let listener: SharedListener = Arc::new(Mutex::new(Box::new(callback)));
        let (replaced, count) = {
            let mut listeners = self.shared.listeners.lock();
            let replaced = listeners.insert(id.clone(), listener).is_some();
            (replaced, listeners.len())
        };

        if replaced {
            warn!(listener = %id, "Scroll listener id reused, previous callback replaced");
        } else {
            debug!(listener = %id, count, "Scroll listener added");
        }
        replaced
    }

    /// Remove the entry for `id`. Returns false (and does nothing) if absent.
    pub fn remove_listener(&self, id: &ListenerId) -> bool {
        let removed = self.shared.listeners.lock().shift_remove(id).is_some();
        if removed {
            debug!(listener = %id, "Scroll listener removed");
        }
        removed
    }

    pub fn contains_listener(&self, id: &ListenerId) -> bool {
        self.shared.listeners.lock().contains_key(id)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.lock().len()
    }

    /// Most recently recorded offset
    pub fn last_offset(&self) -> ScrollOffset {
        self.shared.last_offset.load(Ordering::Acquire)
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Note a viewport resize; a broadcast follows once resizing settles
    pub fn handle_resize(&self) {
        let now = self.shared.clock.now();
        self.shared.scheduler.lock().resize.trigger(now);
    }

    /// Force a broadcast on the next tick
    pub fn request_frame(&self) {
        self.shared.frame_requested.store(true, Ordering::Release);
    }

    /// Whether a scroll, resize or explicit request is waiting on a frame
    pub fn has_pending_work(&self) -> bool {
        if self.shared.frame_requested.load(Ordering::Acquire) {
            return true;
        }
        let scheduler = self.shared.scheduler.lock();
        scheduler.scroll.is_pending() || scheduler.resize.is_pending()
    }

    /// Frame boundary. Call once per host frame.
    ///
    /// Returns a report when a broadcast was delivered in this frame.
    pub fn tick(&self) -> Option<TickReport> {
        let now = self.shared.clock.now();
        {
            let mut scheduler = self.shared.scheduler.lock();
            scheduler.scroll.poll(now);
            scheduler.resize.poll(now);
        }

        if !self.shared.frame_requested.swap(false, Ordering::AcqRel) {
            return None;
        }
        Some(self.broadcast())
    }

    fn broadcast(&self) -> TickReport {
        let offset = self.last_offset();

        // Snapshot so callbacks may add/remove listeners without deadlocking
        let snapshot: Vec<(ListenerId, SharedListener)> = self
            .shared
            .listeners
            .lock()
            .iter()
            .map(|(id, listener)| (id.clone(), listener.clone()))
            .collect();

        let mut delivered = 0;
        let mut failed = 0;

        for (id, listener) in snapshot {
            // Skip entries removed or replaced earlier in this tick
            let current = self
                .shared
                .listeners
                .lock()
                .get(&id)
                .is_some_and(|entry| Arc::ptr_eq(entry, &listener));
            if !current {
                continue;
            }

            let mut callback = listener.lock();
            let f: &mut ListenerFn = &mut **callback;
            match catch_unwind(AssertUnwindSafe(|| f(offset))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    failed += 1;
                    warn!(listener = %id, offset, error = %e, "Scroll listener failed");
                }
                Err(panic) => {
                    failed += 1;
                    error!(
                        listener = %id,
                        offset,
                        panic = panic_message(panic.as_ref()),
                        "Scroll listener panicked"
                    );
                }
            }
        }

        self.shared.broadcasts.fetch_add(1, Ordering::Relaxed);
        if failed > 0 {
            self.shared
                .failures
                .fetch_add(failed as u64, Ordering::Relaxed);
        }
        trace!(offset, delivered, failed, "Broadcast tick");

        TickReport {
            offset,
            delivered,
            failed,
        }
    }

    pub fn stats(&self) -> BroadcastStats {
        BroadcastStats {
            native_subscriptions: self.shared.native_subscriptions.load(Ordering::Relaxed),
            listeners: self.listener_count(),
            broadcasts: self.shared.broadcasts.load(Ordering::Relaxed),
            failures: self.shared.failures.load(Ordering::Relaxed),
            last_offset: self.last_offset(),
        }
    }
}

impl std::fmt::Debug for ScrollBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollBroadcaster")
            .field("stats", &self.stats())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
