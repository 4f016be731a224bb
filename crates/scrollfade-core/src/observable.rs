//! Shared published values for scroll-driven bindings
//!
//! A binding writes from inside a broadcast tick; the view reads on render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Lifecycle of a binding's broadcaster registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Listener registered, value tracks scroll
    Bound,
    /// Listener absent, value frozen at its last update
    Unbound,
}

/// Value shared between a binding and the view that renders it
#[derive(Debug)]
pub struct Observable<T> {
    value: Arc<RwLock<T>>,
    version: Arc<AtomicU64>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            version: self.version.clone(),
        }
    }
}

impl<T: Copy + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn get(&self) -> T {
        *self.value.read()
    }

    /// Store `value`; returns true if it differs from the previous one
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        self.version.fetch_add(1, Ordering::Release);
        true
    }

    /// Incremented on every change, for cheap "needs redraw" checks
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}
