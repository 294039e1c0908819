use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::fenwick::Fenwick;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_size(&mut self, start: u64, end_exclusive: u64) -> f64 {
        self.gen_range_u64(start, end_exclusive) as f64
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

type RangeLog = Arc<Mutex<Vec<Range>>>;

fn range_log() -> (RangeLog, impl Fn(Range) + Send + Sync + 'static) {
    let log: RangeLog = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let log = Arc::clone(&log);
        move |r: Range| log.lock().unwrap().push(r)
    };
    (log, sink)
}

fn ids(n: u64) -> Vec<u64> {
    (0..n).collect()
}

fn assert_well_formed(e: &RangeEngine<u64>) {
    let r = e.get_range();
    let len = e.unique_ids().len();
    if len == 0 {
        assert_eq!(r, Range::default());
    } else {
        assert!(r.start <= r.end, "start > end: {r:?}");
        assert!(r.end < len, "end out of bounds: {r:?} len={len}");
    }
    assert!(r.pad_front >= 0.0 && r.pad_behind >= 0.0, "negative padding: {r:?}");
}

#[test]
fn initial_range_is_emitted_once_and_anchored_at_zero() {
    let (log, sink) = range_log();
    let e = RangeEngine::new(Config::new(5, 20.0).with_buffer(1), ids(100), sink);

    let r = e.get_range();
    assert_eq!(r.start, 0);
    // keeps(5) + 2 * buffer(1) items
    assert_eq!(r.end, 6);
    assert_eq!(r.pad_front, 0.0);
    // items 7..100 at the estimate
    assert_eq!(r.pad_behind, 93.0 * 20.0);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], r);
}

#[test]
fn default_buffer_is_a_third_of_keeps() {
    let e = RangeEngine::new(Config::new(30, 50.0), ids(1000), |_| {});
    assert_eq!(e.config().buffer, 10);
    assert_eq!(e.get_range().end, 49);
}

#[test]
fn scroll_moves_window_and_recomputes_padding() {
    let (log, sink) = range_log();
    let mut e = RangeEngine::new(Config::new(5, 20.0).with_buffer(1), ids(100), sink);

    e.handle_scroll(100.0);
    let r = e.get_range();
    assert_eq!(r.start, 4);
    assert_eq!(r.end, 10);
    assert_eq!(r.pad_front, 4.0 * 20.0);
    assert_eq!(r.pad_behind, 89.0 * 20.0);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn repeated_offset_is_static_and_silent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut e = RangeEngine::new(Config::new(5, 20.0), ids(100), {
        let calls = Arc::clone(&calls);
        move |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    e.handle_scroll(400.0);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert!(e.is_behind());

    e.handle_scroll(400.0);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert_eq!(e.direction(), Direction::Static);
    assert!(!e.is_front());
    assert!(!e.is_behind());
}

#[test]
fn direction_tracks_offset_changes() {
    let mut e = RangeEngine::new(Config::new(5, 20.0), ids(100), |_| {});
    assert!(!e.is_front());
    assert!(!e.is_behind());

    e.handle_scroll(300.0);
    assert!(e.is_behind());
    e.handle_scroll(120.0);
    assert!(e.is_front());
    assert_eq!(e.offset(), 120.0);
}

#[test]
fn scroll_within_same_window_does_not_fire() {
    let (log, sink) = range_log();
    let mut e = RangeEngine::new(Config::new(5, 20.0).with_buffer(1), ids(100), sink);

    e.handle_scroll(100.0);
    // Still inside item 5: same index, same range.
    e.handle_scroll(110.0);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn window_stays_full_at_the_tail() {
    let mut e = RangeEngine::new(Config::new(10, 20.0).with_buffer(0), ids(100), |_| {});
    e.handle_scroll(1_000_000.0);
    let r = e.get_range();
    assert_eq!(r.end, 99);
    assert_eq!(r.start, 90);
    assert_eq!(r.pad_behind, 0.0);
    assert_eq!(r.pad_front, 90.0 * 20.0);
}

#[test]
fn measuring_first_item_changes_offset_of_second() {
    let names: Vec<String> = ["a", "b", "c", "d", "e", "f"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut e = RangeEngine::new(Config::new(5, 20.0), names, |_| {});

    assert_eq!(e.get_offset(1), 20.0);
    e.save_size("a".to_string(), 50.0);
    assert_eq!(e.get_offset(1), 50.0);
    assert_eq!(e.size_store().size_of(&"a".to_string()), Some(50.0));
    assert_eq!(e.size_store().size_of(&"b".to_string()), None);
}

#[test]
fn remeasuring_replaces_previous_size_in_average() {
    let mut s = SizeStore::<u64>::new(20.0);
    assert_eq!(s.average_size(), 20.0);

    assert_eq!(s.record(7, 10.0), Recorded::Inserted);
    assert_eq!(s.record(7, 30.0), Recorded::Updated { previous: 10.0 });

    assert_eq!(s.count(), 1);
    assert_eq!(s.size_of(&7), Some(30.0));
    assert_eq!(s.total_measured_size(), 30.0);
    assert_eq!(s.average_size(), 30.0);
    assert_eq!(s.estimate(&8), 30.0);
}

#[test]
fn malformed_measurements_are_ignored_and_reported() {
    let seen = Arc::new(AtomicUsize::new(0));
    let config = Config::new(5, 20.0).with_on_diagnostic(Some({
        let seen = Arc::clone(&seen);
        move |d: Diagnostic| {
            assert!(matches!(d, Diagnostic::MalformedMeasurement { .. }));
            seen.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let mut e = RangeEngine::new(config, ids(10), |_| {});

    e.save_size(0, 40.0);
    e.save_size(1, f64::NAN);
    e.save_size(2, -1.0);
    e.save_size(3, f64::INFINITY);

    assert_eq!(seen.load(Ordering::Relaxed), 3);
    assert_eq!(e.size_store().count(), 1);
    assert_eq!(e.size_store().average_size(), 40.0);
    assert_eq!(e.get_offset(2), 80.0);
}

#[test]
fn shrinking_list_slides_window_to_new_tail() {
    let mut e = RangeEngine::new(Config::new(10, 20.0).with_buffer(0), ids(100), |_| {});
    e.handle_scroll(1900.0);
    let r = e.get_range();
    assert_eq!((r.start, r.end), (90, 99));

    e.update_param(Param::UniqueIds(ids(50)));
    e.handle_data_sources_change();
    let r = e.get_range();
    assert_eq!(r.end, 49);
    assert_eq!(r.start, 40);
    assert_eq!(r.pad_front, 40.0 * 20.0);
    assert_eq!(r.pad_behind, 0.0);
}

#[test]
fn growing_list_fills_an_undersized_window() {
    let mut e = RangeEngine::new(Config::new(5, 10.0).with_buffer(1), ids(3), |_| {});
    assert_eq!((e.get_range().start, e.get_range().end), (0, 2));

    e.update_param(Param::UniqueIds(ids(100)));
    e.handle_data_sources_change();
    let r = e.get_range();
    assert_eq!((r.start, r.end), (0, 6));
    assert_eq!(r.pad_behind, 93.0 * 10.0);
}

#[test]
fn unique_ids_update_alone_does_not_recompute() {
    let (log, sink) = range_log();
    let mut e = RangeEngine::new(Config::new(5, 10.0), ids(100), sink);
    let before = e.get_range();

    e.update_param(Param::UniqueIds(ids(200)));
    assert_eq!(e.get_range(), before);
    assert_eq!(log.lock().unwrap().len(), 1);

    e.handle_data_sources_change();
    assert!(e.get_range().pad_behind > before.pad_behind);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn empty_list_yields_degenerate_range() {
    let (log, sink) = range_log();
    let mut e = RangeEngine::new(Config::new(5, 10.0), Vec::<u64>::new(), sink);
    assert_eq!(e.get_range(), Range::default());
    assert_eq!(log.lock().unwrap().len(), 1);

    e.handle_scroll(50.0);
    e.handle_slot_size_change();
    e.handle_data_sources_change();
    e.update_param(Param::SlotHeaderSize(40.0));
    assert_eq!(e.get_range(), Range::default());
    assert_eq!(e.index_at_offset(0.0), None);
    assert_eq!(e.get_offset(3), 40.0);

    e.update_param(Param::UniqueIds(ids(20)));
    e.handle_data_sources_change();
    let r = e.get_range();
    assert_eq!((r.start, r.end), (0, 6));
    assert_eq!(r.pad_front, 40.0);
}

#[test]
fn list_emptied_collapses_to_zero_range() {
    let mut e = RangeEngine::new(Config::new(5, 10.0), ids(20), |_| {});
    e.handle_scroll(100.0);
    e.update_param(Param::UniqueIds(Vec::new()));
    e.handle_data_sources_change();
    assert_eq!(e.get_range(), Range::default());
}

#[test]
fn get_offset_equals_exact_measured_sum_plus_header() {
    let mut rng = Lcg::new(7);
    let config = Config::new(10, 33.0).with_slot_sizes(12.0, 8.0);
    let mut e = RangeEngine::new(config, ids(500), |_| {});

    let mut expected = 12.0;
    for i in 0..200u64 {
        let size = rng.gen_size(1, 120);
        e.save_size(i, size);
        expected += size;
        assert_eq!(e.get_offset(i as usize + 1), expected);
    }
    assert_eq!(e.get_offset(0), 12.0);
}

#[test]
fn get_offset_clamps_index_to_len() {
    let e = RangeEngine::new(Config::new(5, 10.0).with_slot_sizes(5.0, 7.0), ids(10), |_| {});
    assert_eq!(e.get_offset(10), 105.0);
    assert_eq!(e.get_offset(1_000), 105.0);
    assert_eq!(e.total_size(), 112.0);
}

#[test]
fn header_resize_only_shifts_front_padding() {
    let (log, sink) = range_log();
    let config = Config::new(3, 10.0).with_buffer(0).with_slot_sizes(30.0, 5.0);
    let mut e = RangeEngine::new(config, ids(20), sink);
    let r = e.get_range();
    assert_eq!(r.pad_front, 30.0);
    assert_eq!(r.pad_behind, 17.0 * 10.0 + 5.0);

    e.update_param(Param::SlotHeaderSize(50.0));
    let next = e.get_range();
    assert_eq!((next.start, next.end), (r.start, r.end));
    assert_eq!(next.pad_front, 50.0);
    assert_eq!(next.pad_behind, r.pad_behind);

    e.update_param(Param::SlotFooterSize(0.0));
    let next = e.get_range();
    assert_eq!(next.pad_behind, 170.0);
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[test]
fn header_counts_toward_scroll_index() {
    let config = Config::new(2, 10.0).with_buffer(0).with_slot_sizes(100.0, 0.0);
    let mut e = RangeEngine::new(config, ids(50), |_| {});

    assert_eq!(e.index_at_offset(0.0), Some(0));
    assert_eq!(e.index_at_offset(99.0), Some(0));
    assert_eq!(e.index_at_offset(110.0), Some(1));

    e.handle_scroll(150.0);
    assert_eq!(e.get_range().start, 5);
    assert_eq!(e.get_range().pad_front, 150.0);
}

#[test]
fn keeps_update_keeps_start_anchored() {
    let mut e = RangeEngine::new(Config::new(4, 10.0).with_buffer(0), ids(50), |_| {});
    e.handle_scroll(100.0);
    assert_eq!((e.get_range().start, e.get_range().end), (10, 13));

    e.update_param(Param::Keeps(8));
    let r = e.get_range();
    assert_eq!((r.start, r.end), (10, 17));
    assert_eq!(r.pad_front, 100.0);
    assert_eq!(r.pad_behind, 32.0 * 10.0);

    e.update_param(Param::Keeps(2));
    let r = e.get_range();
    assert_eq!((r.start, r.end), (10, 11));

    e.update_param(Param::Buffer(1));
    let r = e.get_range();
    assert_eq!((r.start, r.end), (10, 13));
}

#[test]
fn measurements_outside_window_are_corrected_lazily() {
    let (log, sink) = range_log();
    let mut e = RangeEngine::new(Config::new(2, 10.0).with_buffer(0), ids(10), sink);
    assert_eq!(e.get_range().pad_behind, 80.0);

    e.save_size(9, 30.0);
    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(e.get_range().pad_behind, 80.0);

    e.handle_slot_size_change();
    // One measured item at 30 moves the running average to 30 for the rest.
    assert_eq!(e.get_range().pad_behind, 8.0 * 30.0);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn estimate_size_update_rederives_padding() {
    let mut e = RangeEngine::new(Config::new(2, 10.0).with_buffer(0), ids(10), |_| {});
    e.update_param(Param::EstimateSize(25.0));
    assert_eq!(e.get_range().pad_behind, 8.0 * 25.0);

    // Once something is measured, the average wins over the configured estimate.
    e.save_size(0, 5.0);
    e.update_param(Param::EstimateSize(40.0));
    assert_eq!(e.get_range().pad_behind, 8.0 * 5.0);
}

#[test]
fn invalid_config_is_clamped_and_reported() {
    let seen: Arc<Mutex<Vec<Diagnostic>>> = Arc::new(Mutex::new(Vec::new()));
    let config = Config::new(0, -5.0)
        .with_slot_sizes(f64::NAN, -3.0)
        .with_on_diagnostic(Some({
            let seen = Arc::clone(&seen);
            move |d| seen.lock().unwrap().push(d)
        }));
    let mut e = RangeEngine::new(config, ids(10), |_| {});

    assert_eq!(e.config().keeps, 1);
    assert_eq!(e.config().estimate_size, MIN_ESTIMATE_SIZE);
    assert_eq!(e.config().slot_header_size, 0.0);
    assert_eq!(e.config().slot_footer_size, 0.0);
    assert_eq!(e.get_range().end, 0);

    e.update_param(Param::Keeps(0));
    assert_eq!(e.config().keeps, 1);

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0],
        Diagnostic::KeepsClamped {
            requested: 0,
            applied: 1
        }
    );
    assert!(matches!(
        seen[1],
        Diagnostic::InvalidSize {
            field: ConfigField::EstimateSize,
            value,
            applied,
        } if value == -5.0 && applied == MIN_ESTIMATE_SIZE
    ));
    assert!(matches!(
        seen[2],
        Diagnostic::InvalidSize {
            field: ConfigField::SlotHeaderSize,
            ..
        }
    ));
    assert!(matches!(
        seen[3],
        Diagnostic::InvalidSize {
            field: ConfigField::SlotFooterSize,
            value,
            applied,
        } if value == -3.0 && applied == 0.0
    ));
    assert!(matches!(seen[4], Diagnostic::KeepsClamped { .. }));
}

#[test]
fn non_finite_offset_is_ignored() {
    let (log, sink) = range_log();
    let mut e = RangeEngine::new(Config::new(5, 10.0), ids(100), sink);
    e.handle_scroll(200.0);
    e.handle_scroll(f64::NAN);
    e.handle_scroll(f64::NEG_INFINITY);
    assert_eq!(e.offset(), 200.0);
    assert!(e.is_behind());
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn reordered_ids_use_measurements_by_identity() {
    let mut e = RangeEngine::new(Config::new(2, 10.0), vec![1u64, 2, 3, 4], |_| {});
    e.save_size(1, 10.0);
    e.save_size(2, 20.0);
    e.save_size(3, 30.0);
    e.save_size(4, 40.0);
    assert_eq!(e.get_offset(2), 30.0);

    e.update_param(Param::UniqueIds(vec![4, 3, 2, 1]));
    // Not yet re-fitted: answered by the linear fallback.
    assert_eq!(e.get_offset(2), 70.0);

    e.handle_data_sources_change();
    assert_eq!(e.get_offset(2), 70.0);
    assert_eq!(e.total_size(), 100.0);
}

#[test]
fn duplicate_ids_are_reported_and_tolerated() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let config = Config::new(2, 10.0).with_on_diagnostic(Some({
        let seen = Arc::clone(&seen);
        move |d| seen.lock().unwrap().push(d)
    }));
    let mut e = RangeEngine::new(config, vec![1u64, 1, 2], |_| {});
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[Diagnostic::DuplicateId { index: 1 }]
    );

    e.save_size(1, 10.0);
    e.save_size(2, 50.0);
    assert_eq!(e.get_offset(2), 20.0);
    assert_eq!(e.get_offset(3), 70.0);
}

#[test]
fn reset_measurements_falls_back_to_estimate() {
    let mut e = RangeEngine::new(Config::new(2, 10.0).with_buffer(0), ids(10), |_| {});
    for i in 0..10 {
        e.save_size(i, 40.0);
    }
    e.handle_slot_size_change();
    assert_eq!(e.get_range().pad_behind, 8.0 * 40.0);

    e.reset_measurements();
    assert_eq!(e.size_store().count(), 0);
    assert_eq!(e.get_range().pad_behind, 8.0 * 10.0);
    assert_eq!(e.get_offset(10), 100.0);
}

#[test]
fn range_stays_well_formed_under_random_events() {
    let mut rng = Lcg::new(0xDEC0DE);
    let keeps = 6;
    let mut e = RangeEngine::new(Config::new(keeps, 24.0), ids(300), |_| {});
    let mut len = 300u64;

    for _ in 0..2_000 {
        match rng.gen_range_usize(0, 6) {
            0 | 1 => {
                let offset = rng.gen_size(0, 20_000) - 100.0;
                e.handle_scroll(offset);
            }
            2 => {
                let id = rng.gen_range_u64(0, len.max(1) + 20);
                e.save_size(id, rng.gen_size(0, 200));
            }
            3 => {
                len = rng.gen_range_u64(0, 400);
                e.update_param(Param::UniqueIds(ids(len)));
                e.handle_data_sources_change();
            }
            4 => {
                if rng.gen_bool() {
                    e.update_param(Param::SlotHeaderSize(rng.gen_size(0, 80)));
                } else {
                    e.update_param(Param::SlotFooterSize(rng.gen_size(0, 80)));
                }
                e.handle_slot_size_change();
            }
            _ => {
                e.update_param(Param::Keeps(rng.gen_range_usize(0, 20)));
            }
        }
        assert_well_formed(&e);
    }
}

#[test]
fn range_is_monotone_in_offset() {
    let mut rng = Lcg::new(42);
    let mut e = RangeEngine::new(Config::new(8, 30.0), ids(2_000), |_| {});
    for i in 0..2_000u64 {
        if rng.gen_bool() {
            e.save_size(i, rng.gen_size(0, 90));
        }
    }
    e.handle_slot_size_change();

    let mut offset = 0.0;
    let mut prev = e.get_range();
    while offset < e.total_size() + 500.0 {
        offset += rng.gen_size(1, 400);
        e.handle_scroll(offset);
        let r = e.get_range();
        assert!(r.start >= prev.start, "start went back: {prev:?} -> {r:?}");
        assert!(r.end >= prev.end, "end went back: {prev:?} -> {r:?}");
        prev = r;
    }
    assert_eq!(prev.end, 1_999);
}

#[test]
fn padding_plus_window_matches_total_size() {
    let mut rng = Lcg::new(99);
    let config = Config::new(5, 16.0).with_slot_sizes(40.0, 60.0);
    let mut e = RangeEngine::new(config, ids(400), |_| {});
    for i in 0..400u64 {
        e.save_size(i, rng.gen_size(4, 64));
    }
    e.handle_scroll(3_000.0);

    let r = e.get_range();
    let window = e.get_offset(r.end + 1) - e.get_offset(r.start);
    assert_eq!(r.pad_front + window + r.pad_behind, e.total_size());
}

#[test]
fn fenwick_matches_linear_reference() {
    let mut rng = Lcg::new(1234);
    for n in [0usize, 1, 2, 3, 7, 8, 9, 64, 257] {
        let mut measured: Vec<Option<f64>> = (0..n)
            .map(|_| rng.gen_bool().then(|| rng.gen_size(0, 50)))
            .collect();
        let mut tree = Fenwick::from_measured(measured.iter().copied());
        assert_eq!(tree.len(), n);

        for _ in 0..20 {
            if n > 0 {
                let i = rng.gen_range_usize(0, n);
                let next = rng.gen_bool().then(|| rng.gen_size(0, 50));
                tree.set(i, next);
                measured[i] = next;
            }

            let average = 7.0;
            let est: Vec<f64> = measured.iter().map(|m| m.unwrap_or(average)).collect();
            let mut acc = 0.0;
            for count in 0..=n {
                assert_eq!(tree.estimated_prefix(count, average), acc);
                if count < n {
                    acc += est[count];
                }
            }

            let target = rng.gen_size(0, (n as u64 + 1) * 40);
            let mut expected = 0usize;
            let mut acc = 0.0;
            for &s in &est {
                acc += s;
                if acc > target {
                    break;
                }
                expected += 1;
            }
            assert_eq!(tree.lower_bound(target, average), expected);
        }
    }
}

#[test]
fn fenwick_updates_do_not_drift_from_a_fresh_build() {
    let mut rng = Lcg::new(77);
    let n = 300;
    let mut measured: Vec<Option<f64>> = alloc::vec![None; n];
    let mut tree = Fenwick::from_measured(measured.iter().copied());

    for _ in 0..5_000 {
        let i = rng.gen_range_usize(0, n);
        // Fractional sizes: deltas would accumulate rounding error here.
        let next = rng.gen_size(1, 1_000) / 7.0;
        tree.set(i, Some(next));
        measured[i] = Some(next);
    }

    let fresh = Fenwick::from_measured(measured.iter().copied());
    for count in 0..=n {
        assert_eq!(tree.prefix(count), fresh.prefix(count), "count={count}");
    }
}

#[test]
fn remeasuring_keeps_cached_offsets_equal_to_linear_sums() {
    let mut e = RangeEngine::new(Config::new(2, 10.0).with_buffer(0), ids(10), |_| {});
    for size in [0.1, 0.7, 0.3, 1.1, 0.2] {
        e.save_size(0, size);
    }
    e.save_size(1, 0.3);
    e.save_size(2, 0.6);

    // Replacing the list with itself forces the linear path until the next rebuild.
    let mut linear = e.clone();
    linear.update_param(Param::UniqueIds(ids(10)));
    for i in 0..=3 {
        assert_eq!(e.get_offset(i), linear.get_offset(i), "index={i}");
    }
}

#[test]
fn duplicate_ids_are_reported_once_per_list() {
    let seen = Arc::new(AtomicUsize::new(0));
    let config = Config::new(2, 10.0).with_on_diagnostic(Some({
        let seen = Arc::clone(&seen);
        move |d: Diagnostic| {
            assert!(matches!(d, Diagnostic::DuplicateId { index: 1 }));
            seen.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let mut e = RangeEngine::new(config, alloc::vec![1u64, 1, 2, 3, 4, 5], |_| {});
    assert_eq!(seen.load(Ordering::Relaxed), 1);

    for step in 0..50u64 {
        e.save_size(3, 10.0 + step as f64);
        e.save_size(1, 5.0 + step as f64);
        e.handle_scroll(((step % 7) * 9) as f64);
    }
    assert_eq!(seen.load(Ordering::Relaxed), 1);

    // Both occurrences of id 1 carry its latest size.
    assert_eq!(e.get_offset(2), 2.0 * 54.0);
    assert_eq!(e.get_offset(4), 2.0 * 54.0 + 10.0 + 59.0);

    // A new list is checked again.
    e.update_param(Param::UniqueIds(alloc::vec![1, 1, 7]));
    e.handle_data_sources_change();
    assert_eq!(seen.load(Ordering::Relaxed), 2);
}

#[test]
fn size_store_exposes_estimate_and_measurements() {
    let mut s = SizeStore::<u64>::new(25.0);
    assert_eq!(s.estimate_size(), 25.0);
    s.record(1, 10.0);
    s.record(2, 30.0);
    s.set_estimate_size(40.0);
    assert_eq!(s.estimate_size(), 40.0);
    // Measurements take over the average once present.
    assert_eq!(s.average_size(), 20.0);

    let mut seen = Vec::new();
    s.for_each_size(|id, size| seen.push((*id, size)));
    seen.sort_by_key(|&(id, _)| id);
    assert_eq!(seen, alloc::vec![(1, 10.0), (2, 30.0)]);

    s.reset();
    assert_eq!(s.count(), 0);
    assert_eq!(s.estimate_size(), 40.0);
}

#[test]
fn range_contains_its_inclusive_bounds() {
    let r = Range {
        start: 4,
        end: 10,
        pad_front: 0.0,
        pad_behind: 0.0,
    };
    assert_eq!(r.len(), 7);
    assert!(r.contains(4));
    assert!(r.contains(10));
    assert!(!r.contains(3));
    assert!(!r.contains(11));
    assert!(r.indices().all(|i| r.contains(i)));
}

#[test]
fn destroy_consumes_engine() {
    let mut e = RangeEngine::new(Config::default(), ids(10), |_| {});
    e.save_size(1, 10.0);
    e.destroy();
}
