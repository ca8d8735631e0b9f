//! Sliding-window behavior checked against a brute-force scan.

use std::thread;
use std::time::{Duration, UNIX_EPOCH};

use warpgrid_window::{IndexedWindow, Recorded, SharedTimeWindow, TimeWindow};

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

fn oracle(history: &[(i32, i64)], current: i64, size: usize) -> (Option<i32>, Option<i32>) {
    let lo = current - size as i64 + 1;
    let live: Vec<i32> = history
        .iter()
        .filter(|(_, idx)| *idx >= lo && *idx <= current)
        .map(|(v, _)| *v)
        .collect();
    (live.iter().copied().max(), live.iter().copied().min())
}

#[test]
fn matches_brute_force_for_increasing_indices() {
    for size in [1usize, 2, 3, 7, 16] {
        let mut rng = Lcg(size as u64 + 17);
        let mut window = IndexedWindow::new(size);
        let mut history = Vec::new();
        let mut index = 0i64;

        for _ in 0..500 {
            // Mostly consecutive buckets, with occasional gaps.
            index += 1 + (rng.next() % 4 == 0) as i64 * (rng.next() % 5) as i64;
            let value = (rng.next() % 1000) as i32 - 500;

            assert_eq!(window.record(value, index), Ok(Recorded::Stored));
            history.push((value, index));

            let (max, min) = oracle(&history, index, size);
            assert_eq!(window.max(), max, "size {size} index {index}");
            assert_eq!(window.min(), min, "size {size} index {index}");
            assert!(window.len() <= size);
        }
    }
}

#[test]
fn eviction_boundary_for_every_capacity() {
    for n in 1..=8usize {
        let mut window = IndexedWindow::new(n);
        // Index 0 carries both extremes.
        window.record(1_000, 0).unwrap();
        for i in 1..n as i64 {
            window.record(i as i32, i).unwrap();
        }
        assert_eq!(window.max(), Some(1_000));

        window.record(-1_000, n as i64).unwrap();
        assert_eq!(window.min(), Some(-1_000));
        let expected_max = if n == 1 { -1_000 } else { n as i32 - 1 };
        assert_eq!(window.max(), Some(expected_max));
        assert!(window.iter().all(|e| e.index >= 1));
    }
}

#[test]
fn time_window_tracks_five_minute_peak() {
    let mut window = TimeWindow::new(Duration::from_secs(300), Duration::from_secs(60)).unwrap();
    let start = 1_700_000_040u64;

    // One sample per minute; the peak at minute 2 rolls off at minute 7.
    let samples = [4, 6, 42, 5, 3, 8, 7, 2];
    for (minute, value) in samples.iter().enumerate() {
        let now = UNIX_EPOCH + Duration::from_secs(start + minute as u64 * 60);
        window.record(now, *value).unwrap();
    }

    // Minutes 3..=7 remain: [5, 3, 8, 7, 2].
    assert_eq!(window.max(), Some(8));
    assert_eq!(window.min(), Some(2));
    assert_eq!(window.len(), 5);
}

#[test]
fn shared_window_across_threads() {
    let window: SharedTimeWindow =
        TimeWindow::new(Duration::from_secs(1_000), Duration::from_secs(1))
            .unwrap()
            .into();

    let writer = {
        let window = window.clone();
        thread::spawn(move || {
            for secs in 0..200u64 {
                window
                    .record(UNIX_EPOCH + Duration::from_secs(secs), secs as i32)
                    .unwrap();
            }
        })
    };

    let reader = {
        let window = window.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                if let Some((max, min)) = window.extremes() {
                    assert!(min <= max);
                }
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(window.max(), Some(199));
    assert_eq!(window.min(), Some(0));
}
