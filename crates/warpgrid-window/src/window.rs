//! Indexed window — fixed-capacity circular buffer keyed by bucket index.
//!
//! Keeps the samples of the most recent `size` logical buckets. Eviction is
//! lazy: stale entries are only dropped from the head when a newer index is
//! recorded. Aggregations are a linear scan over the occupied slots, so any
//! fold (not just max/min) can be computed without extra bookkeeping.

use tracing::{debug, trace};

use crate::error::{WindowError, WindowResult};

/// Value reported by the `*_or_sentinel` accessors when the window is empty.
pub const EMPTY_SENTINEL: i32 = -1;

/// A sample tagged with the logical bucket it belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Entry {
    pub value: i32,
    pub index: i64,
}

/// Outcome of a successful `record` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// The sample now occupies a slot.
    Stored,
    /// The buffer was still full after eviction; the sample was discarded.
    Dropped,
}

/// A fold over the values retained in a window.
pub trait Aggregation {
    /// Combine the running result with the next value (oldest to newest).
    fn combine(acc: i32, next: i32) -> i32;
}

/// Largest retained value.
#[derive(Debug, Clone, Copy)]
pub struct Max;

/// Smallest retained value.
#[derive(Debug, Clone, Copy)]
pub struct Min;

impl Aggregation for Max {
    fn combine(acc: i32, next: i32) -> i32 {
        acc.max(next)
    }
}

impl Aggregation for Min {
    fn combine(acc: i32, next: i32) -> i32 {
        acc.min(next)
    }
}

/// Sliding window over the most recent `size` bucket indices.
///
/// Indices passed to [`record`](Self::record) must be non-decreasing.
/// Several samples may share an index; they are not merged, each one takes
/// its own slot while there is room.
#[derive(Debug, Clone)]
pub struct IndexedWindow {
    /// Slot storage, allocated once.
    buffer: Box<[Entry]>,
    /// Slot of the oldest occupied entry.
    first: usize,
    /// Number of occupied slots.
    length: usize,
    /// Newest index accepted so far.
    last_index: Option<i64>,
}

impl IndexedWindow {
    /// Create a window that retains `size` buckets.
    ///
    /// A size of zero is allowed and yields a window that never holds data.
    pub fn new(size: usize) -> Self {
        Self {
            buffer: vec![Entry::default(); size].into_boxed_slice(),
            first: 0,
            length: 0,
            last_index: None,
        }
    }

    /// Fixed capacity in buckets.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Newest index accepted by `record`, if any.
    pub fn last_index(&self) -> Option<i64> {
        self.last_index
    }

    /// Record `value` in bucket `index`.
    ///
    /// First evicts every entry that is `size` or more buckets older than
    /// `index`, then appends the sample if a slot is free. When the buffer
    /// is still full the sample is dropped and [`Recorded::Dropped`] is
    /// returned. An index older than the newest one seen is rejected and
    /// leaves the window untouched.
    pub fn record(&mut self, value: i32, index: i64) -> WindowResult<Recorded> {
        if let Some(last) = self.last_index
            && index < last
        {
            return Err(WindowError::OutOfOrder { index, last });
        }
        self.last_index = Some(index);

        let mut evicted = 0usize;
        while self.length > 0 && self.is_stale(self.buffer[self.first].index, index) {
            self.first = self.slot(self.first + 1);
            self.length -= 1;
            evicted += 1;
        }
        if evicted > 0 {
            trace!(evicted, index, "evicted stale entries");
        }

        if self.length < self.size() {
            let slot = self.slot(self.first + self.length);
            self.buffer[slot] = Entry { value, index };
            self.length += 1;
            Ok(Recorded::Stored)
        } else {
            debug!(value, index, size = self.size(), "window full, sample dropped");
            Ok(Recorded::Dropped)
        }
    }

    /// Retained entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        (0..self.length).map(move |i| &self.buffer[self.slot(self.first + i)])
    }

    /// Fold the retained values with `A`. `None` when empty.
    pub fn aggregate<A: Aggregation>(&self) -> Option<i32> {
        let mut entries = self.iter();
        let first = entries.next()?.value;
        Some(entries.fold(first, |acc, e| A::combine(acc, e.value)))
    }

    pub fn max(&self) -> Option<i32> {
        self.aggregate::<Max>()
    }

    pub fn min(&self) -> Option<i32> {
        self.aggregate::<Min>()
    }

    /// Maximum, or [`EMPTY_SENTINEL`] when nothing is retained.
    pub fn max_or_sentinel(&self) -> i32 {
        self.max().unwrap_or(EMPTY_SENTINEL)
    }

    /// Minimum, or [`EMPTY_SENTINEL`] when nothing is retained.
    pub fn min_or_sentinel(&self) -> i32 {
        self.min().unwrap_or(EMPTY_SENTINEL)
    }

    fn slot(&self, i: usize) -> usize {
        i % self.size()
    }

    /// `entry <= newest - size`, evaluated without overflow.
    fn is_stale(&self, entry: i64, newest: i64) -> bool {
        i128::from(entry) + self.size() as i128 <= i128::from(newest)
    }
}
