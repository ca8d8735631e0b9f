//! Shared time window — a [`TimeWindow`] behind a mutex.
//!
//! The core window types assume a single owner. Use this wrapper when a
//! metrics task records samples while a scaling loop reads extremes.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use crate::error::WindowResult;
use crate::time_window::TimeWindow;
use crate::window::Recorded;

/// Cloneable handle to a mutex-protected [`TimeWindow`].
///
/// Every call holds the lock for one bounded, non-blocking operation.
#[derive(Debug, Clone)]
pub struct SharedTimeWindow {
    inner: Arc<Mutex<TimeWindow>>,
}

impl SharedTimeWindow {
    pub fn new(window: TimeWindow) -> Self {
        Self {
            inner: Arc::new(Mutex::new(window)),
        }
    }

    pub fn record(&self, now: SystemTime, value: i32) -> WindowResult<Recorded> {
        self.lock().record(now, value)
    }

    pub fn max(&self) -> Option<i32> {
        self.lock().max()
    }

    pub fn min(&self) -> Option<i32> {
        self.lock().min()
    }

    /// `(max, min)` read under a single lock acquisition.
    pub fn extremes(&self) -> Option<(i32, i32)> {
        let window = self.lock();
        Some((window.max()?, window.min()?))
    }

    /// Run `f` against the window while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&TimeWindow) -> R) -> R {
        f(&self.lock())
    }

    // Window operations never panic mid-update; poisoning is recoverable.
    fn lock(&self) -> MutexGuard<'_, TimeWindow> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<TimeWindow> for SharedTimeWindow {
    fn from(window: TimeWindow) -> Self {
        Self::new(window)
    }
}
