//! Time window — maps wall-clock samples onto an [`IndexedWindow`].
//!
//! Time is quantized into buckets of `granularity`; the window retains
//! `ceil(duration / granularity)` buckets.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::{WindowError, WindowResult};
use crate::window::{IndexedWindow, Recorded};

/// Largest bucket count a window may allocate.
pub const MAX_BUCKETS: usize = 1 << 20;

/// Rolling max/min over the trailing `duration` of wall-clock time.
#[derive(Debug, Clone)]
pub struct TimeWindow {
    window: IndexedWindow,
    granularity: Duration,
    duration: Duration,
}

impl TimeWindow {
    /// Create a window covering `duration`, bucketed by `granularity`.
    ///
    /// Fails if `granularity` is zero or the window would need more than
    /// [`MAX_BUCKETS`] buckets. A `duration` of zero is accepted and
    /// produces a window that never retains a sample.
    pub fn new(duration: Duration, granularity: Duration) -> WindowResult<Self> {
        if granularity.is_zero() {
            return Err(WindowError::InvalidGranularity);
        }

        let buckets = duration.as_nanos().div_ceil(granularity.as_nanos());
        let capacity = usize::try_from(buckets)
            .ok()
            .filter(|&c| c <= MAX_BUCKETS)
            .ok_or_else(|| {
                WindowError::InvalidDuration(format!(
                    "{duration:?} spans {buckets} buckets of {granularity:?}, limit is {MAX_BUCKETS}"
                ))
            })?;

        debug!(
            duration_secs = duration.as_secs_f64(),
            granularity_secs = granularity.as_secs_f64(),
            capacity,
            "time window created"
        );

        Ok(Self {
            window: IndexedWindow::new(capacity),
            granularity,
            duration,
        })
    }

    /// Bucket index for `now`: whole granularities elapsed since the epoch.
    pub fn bucket_index(&self, now: SystemTime) -> WindowResult<i64> {
        let since_epoch = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| WindowError::BeforeEpoch)?;
        let index = since_epoch.as_nanos() / self.granularity.as_nanos();
        Ok(i64::try_from(index).unwrap_or(i64::MAX))
    }

    /// Record `value` observed at `now`.
    ///
    /// Samples within the same bucket are not merged; each one is appended
    /// while the window has room (see [`IndexedWindow::record`]).
    pub fn record(&mut self, now: SystemTime, value: i32) -> WindowResult<Recorded> {
        let index = self.bucket_index(now)?;
        self.window.record(value, index)
    }

    pub fn max(&self) -> Option<i32> {
        self.window.max()
    }

    pub fn min(&self) -> Option<i32> {
        self.window.min()
    }

    pub fn max_or_sentinel(&self) -> i32 {
        self.window.max_or_sentinel()
    }

    pub fn min_or_sentinel(&self) -> i32 {
        self.window.min_or_sentinel()
    }

    /// Number of buckets retained.
    pub fn capacity(&self) -> usize {
        self.window.size()
    }

    pub fn granularity(&self) -> Duration {
        self.granularity
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The underlying indexed window.
    pub fn window(&self) -> &IndexedWindow {
        &self.window
    }
}
