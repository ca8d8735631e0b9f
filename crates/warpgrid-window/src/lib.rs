//! warpgrid-window — bounded rolling max/min for autoscaling signals.
//!
//! Tracks the extremes of a stream of `i32` samples (concurrency, CPU
//! millicores, queue depth) over a trailing time span, using a fixed amount
//! of memory.
//!
//! # Architecture
//!
//! ```text
//! TimeWindow
//!   ├── record(now, value) ← index = floor(now / granularity)
//!   │     └── IndexedWindow::record(value, index)
//!   │           ├── evict head while head.index <= index - size
//!   │           └── append if a slot is free, else drop
//!   └── max() / min()      → linear scan over retained entries
//!
//! SharedTimeWindow
//!   └── Arc<Mutex<TimeWindow>> for a writer task + reader loop
//! ```
//!
//! The window holds `ceil(duration / granularity)` buckets. Indices must not
//! decrease; an older index is rejected with [`WindowError::OutOfOrder`].

pub mod config;
pub mod error;
pub mod shared;
pub mod time_window;
pub mod window;

pub use config::{WindowConfig, parse_duration};
pub use error::{WindowError, WindowResult};
pub use shared::SharedTimeWindow;
pub use time_window::{MAX_BUCKETS, TimeWindow};
pub use window::{Aggregation, EMPTY_SENTINEL, Entry, IndexedWindow, Max, Min, Recorded};
