use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp;

use crate::config::{OnRangeChanged, Param};
use crate::fenwick::Fenwick;
use crate::key::{KeyCacheKey, KeyMap};
use crate::size_store::{Recorded, SizeStore};
use crate::{Config, ConfigField, Diagnostic, Direction, ItemKey, Range};

/// Computes which slice of a long list to materialize for a given scroll offset.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects.
/// - The owning view forwards scroll offsets, measurements and data-source changes.
/// - The resulting [`Range`] is delivered through the `on_range_changed` callback and can be
///   read back with [`Self::get_range`].
///
/// Everything runs synchronously on the caller's thread. The callback only receives the new
/// range, so it cannot call back into the engine while an update is in flight.
#[derive(Clone)]
pub struct RangeEngine<K = ItemKey> {
    config: Config,
    unique_ids: Vec<K>,
    sizes: SizeStore<K>,
    range: Range,
    direction: Direction,
    offset: f64,

    sums: Fenwick,
    sums_stale: bool,
    // First position of every id; later occurrences of a duplicated id live in
    // `duplicate_positions`.
    positions: KeyMap<K, usize>,
    duplicate_positions: KeyMap<K, Vec<usize>>,
    positions_stale: bool,

    on_range_changed: OnRangeChanged,
}

impl<K: KeyCacheKey + Clone> RangeEngine<K> {
    /// Creates an engine and synchronously emits the initial range anchored at index 0.
    ///
    /// Invalid configuration is clamped (see [`Config`]), never rejected.
    pub fn new(
        mut config: Config,
        unique_ids: Vec<K>,
        on_range_changed: impl Fn(Range) + Send + Sync + 'static,
    ) -> Self {
        config.sanitize();
        vdebug!(
            len = unique_ids.len(),
            keeps = config.keeps,
            buffer = config.buffer,
            estimate_size = config.estimate_size,
            "RangeEngine::new"
        );
        let mut e = Self {
            sizes: SizeStore::new(config.estimate_size),
            config,
            unique_ids,
            range: Range::default(),
            direction: Direction::Static,
            offset: 0.0,
            sums: Fenwick::default(),
            sums_stale: true,
            positions: KeyMap::new(),
            duplicate_positions: KeyMap::new(),
            positions_stale: true,
            on_range_changed: Arc::new(on_range_changed),
        };
        e.ensure_sums();
        e.range = e.anchored_range(0);
        (e.on_range_changed)(e.range);
        e
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn unique_ids(&self) -> &[K] {
        &self.unique_ids
    }

    pub fn size_store(&self) -> &SizeStore<K> {
        &self.sizes
    }

    /// Last offset passed to [`Self::handle_scroll`].
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_front(&self) -> bool {
        self.direction == Direction::Front
    }

    pub fn is_behind(&self) -> bool {
        self.direction == Direction::Behind
    }

    pub fn get_range(&self) -> Range {
        self.range
    }

    /// Applies a single configuration change.
    ///
    /// - `Keeps`/`Buffer`: keeps `start` anchored and re-derives `end` and the paddings.
    /// - `EstimateSize`: re-derives the paddings.
    /// - `SlotHeaderSize`/`SlotFooterSize`: shifts `pad_front`/`pad_behind` by the size delta.
    /// - `UniqueIds`: stores the new list only; call [`Self::handle_data_sources_change`] next.
    pub fn update_param(&mut self, param: Param<K>) {
        match param {
            Param::Keeps(keeps) => {
                self.config.keeps = self.config.sanitize_keeps(keeps);
                vtrace!(keeps = self.config.keeps, "update_param");
                self.reanchor();
            }
            Param::Buffer(buffer) => {
                self.config.buffer = buffer;
                vtrace!(buffer, "update_param");
                self.reanchor();
            }
            Param::EstimateSize(size) => {
                let size = self.config.sanitize_size(ConfigField::EstimateSize, size);
                self.config.estimate_size = size;
                self.sizes.set_estimate_size(size);
                self.refresh_padding();
            }
            Param::SlotHeaderSize(size) => {
                let size = self
                    .config
                    .sanitize_size(ConfigField::SlotHeaderSize, size);
                let delta = size - self.config.slot_header_size;
                self.config.slot_header_size = size;
                if !self.unique_ids.is_empty() {
                    let mut next = self.range;
                    next.pad_front = (next.pad_front + delta).max(0.0);
                    self.apply(next);
                }
            }
            Param::SlotFooterSize(size) => {
                let size = self
                    .config
                    .sanitize_size(ConfigField::SlotFooterSize, size);
                let delta = size - self.config.slot_footer_size;
                self.config.slot_footer_size = size;
                if !self.unique_ids.is_empty() {
                    let mut next = self.range;
                    next.pad_behind = (next.pad_behind + delta).max(0.0);
                    self.apply(next);
                }
            }
            Param::UniqueIds(ids) => {
                vdebug!(
                    prev_len = self.unique_ids.len(),
                    len = ids.len(),
                    "update_param: unique_ids"
                );
                self.unique_ids = ids;
                self.positions_stale = true;
                self.sums_stale = true;
            }
        }
    }

    /// Re-fits the range after the id list changed length.
    ///
    /// When the list shrank past `end`, the window slides back so that it ends on the last item.
    /// When the window is short of a full `keeps + 2 * buffer`, `end` is extended from `start`.
    /// An empty list yields the degenerate zero range.
    pub fn handle_data_sources_change(&mut self) {
        self.ensure_sums();
        let len = self.unique_ids.len();
        vdebug!(len, start = self.range.start, end = self.range.end, "handle_data_sources_change");
        if len == 0 {
            self.apply(Range::default());
            return;
        }

        let last = len - 1;
        let mut start = self.range.start;
        let mut end = self.range.end;
        if end > last {
            end = last;
            start = end.saturating_sub(self.config.keeps - 1);
        }
        start = cmp::min(start, end);
        end = cmp::min(last, start.saturating_add(self.config.window() - 1));
        self.apply(self.padded(start, end));
    }

    /// Recomputes both paddings from scratch without moving `start`/`end`.
    pub fn handle_slot_size_change(&mut self) {
        self.refresh_padding();
    }

    /// Updates the range for a new scroll offset.
    ///
    /// Repeating the previous offset is a no-op and does not fire the callback.
    pub fn handle_scroll(&mut self, offset: f64) {
        if !offset.is_finite() {
            vwarn!(offset, "ignoring non-finite scroll offset");
            self.config.diagnose(Diagnostic::NonFiniteOffset { offset });
            return;
        }

        self.direction = if offset > self.offset {
            Direction::Behind
        } else if offset < self.offset {
            Direction::Front
        } else {
            Direction::Static
        };
        self.offset = offset;
        vtrace!(offset, direction = ?self.direction, "handle_scroll");
        if self.direction == Direction::Static {
            return;
        }

        self.ensure_sums();
        let len = self.unique_ids.len();
        if len == 0 {
            self.apply(Range::default());
            return;
        }

        let window = self.config.window();
        let last = len - 1;
        let index = self.index_at_offset_inner(offset);
        let mut start = index.saturating_sub(self.config.buffer);
        let end = cmp::min(last, start.saturating_add(window - 1));
        if end + 1 - start < window {
            // Cut short by the tail: keep the window full.
            start = (end + 1).saturating_sub(window);
        }
        self.apply(self.padded(start, end));
    }

    /// Records a measurement.
    ///
    /// The range paddings are not corrected here; they catch up on the next
    /// `handle_scroll`/`handle_slot_size_change`/`handle_data_sources_change`.
    pub fn save_size(&mut self, id: K, size: f64) {
        let first = self.positions.get(&id).copied();
        let duplicates = self.duplicate_positions.get(&id);

        if let Recorded::Ignored = self.sizes.record(id, size) {
            vwarn!(size, "ignoring malformed measurement");
            self.config
                .diagnose(Diagnostic::MalformedMeasurement { size });
            return;
        }
        vtrace!(size, measured = self.sizes.count(), "save_size");

        // A pending rebuild reads every size from the store.
        if self.sums_stale {
            return;
        }
        if let Some(index) = first {
            self.sums.set(index, Some(size));
            for &index in duplicates.into_iter().flatten() {
                self.sums.set(index, Some(size));
            }
        }
    }

    /// Scroll offset at which item `index` starts: header size plus the estimated size of every
    /// item before it. `index` is clamped to the list length.
    pub fn get_offset(&self, index: usize) -> f64 {
        let index = cmp::min(index, self.unique_ids.len());
        self.config.slot_header_size + self.estimated_prefix(index)
    }

    /// Estimated full scroll extent: header, every item, footer.
    pub fn total_size(&self) -> f64 {
        self.config.slot_header_size
            + self.estimated_prefix(self.unique_ids.len())
            + self.config.slot_footer_size
    }

    /// Index of the item covering `offset`, or `None` for an empty list or non-finite offset.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if self.unique_ids.is_empty() || !offset.is_finite() {
            return None;
        }
        Some(self.index_at_offset_inner(offset))
    }

    /// Forgets every measurement and re-derives the paddings from the configured estimate.
    pub fn reset_measurements(&mut self) {
        vdebug!(measured = self.sizes.count(), "reset_measurements");
        self.sizes.reset();
        self.sums_stale = true;
        self.refresh_padding();
    }

    /// Tears the engine down, releasing the size store and cached prefix sums.
    pub fn destroy(self) {
        vdebug!(
            len = self.unique_ids.len(),
            measured = self.sizes.count(),
            "RangeEngine::destroy"
        );
    }

    fn apply(&mut self, next: Range) {
        debug_assert!(
            self.unique_ids.is_empty() || (next.start <= next.end && next.end < self.unique_ids.len()),
            "range out of bounds (start={}, end={}, len={})",
            next.start,
            next.end,
            self.unique_ids.len()
        );
        debug_assert!(
            next.pad_front >= 0.0 && next.pad_behind >= 0.0,
            "negative padding (front={}, behind={})",
            next.pad_front,
            next.pad_behind
        );
        if next == self.range {
            return;
        }
        self.range = next;
        vtrace!(
            start = next.start,
            end = next.end,
            pad_front = next.pad_front,
            pad_behind = next.pad_behind,
            "range changed"
        );
        (self.on_range_changed)(next);
    }

    fn reanchor(&mut self) {
        self.ensure_sums();
        self.apply(self.anchored_range(self.range.start));
    }

    fn refresh_padding(&mut self) {
        self.ensure_sums();
        let len = self.unique_ids.len();
        if len == 0 {
            self.apply(Range::default());
            return;
        }
        let end = cmp::min(self.range.end, len - 1);
        let start = cmp::min(self.range.start, end);
        self.apply(self.padded(start, end));
    }

    fn anchored_range(&self, start: usize) -> Range {
        let len = self.unique_ids.len();
        if len == 0 {
            return Range::default();
        }
        let last = len - 1;
        let start = cmp::min(start, last);
        let end = cmp::min(last, start.saturating_add(self.config.window() - 1));
        self.padded(start, end)
    }

    fn padded(&self, start: usize, end: usize) -> Range {
        let len = self.unique_ids.len();
        let before = self.estimated_prefix(start);
        let through_end = self.estimated_prefix(cmp::min(end + 1, len));
        let total = self.estimated_prefix(len);
        Range {
            start,
            end,
            pad_front: self.config.slot_header_size + before,
            pad_behind: (total - through_end).max(0.0) + self.config.slot_footer_size,
        }
    }

    fn estimated_prefix(&self, count: usize) -> f64 {
        if self.sums_stale {
            return self.unique_ids[..count]
                .iter()
                .map(|id| self.sizes.estimate(id))
                .sum();
        }
        self.sums
            .estimated_prefix(count, self.sizes.average_size())
    }

    fn index_at_offset_inner(&self, offset: f64) -> usize {
        let len = self.unique_ids.len();
        debug_assert!(len > 0, "index lookup on an empty list");
        let target = offset - self.config.slot_header_size;
        if target <= 0.0 {
            return 0;
        }

        let consumed = if self.sums_stale {
            let mut acc = 0.0f64;
            let mut consumed = 0usize;
            for id in &self.unique_ids {
                acc += self.sizes.estimate(id);
                if acc > target {
                    break;
                }
                consumed += 1;
            }
            consumed
        } else {
            self.sums.lower_bound(target, self.sizes.average_size())
        };
        cmp::min(consumed, len.saturating_sub(1))
    }

    fn ensure_sums(&mut self) {
        if !self.sums_stale {
            return;
        }
        vdebug!(len = self.unique_ids.len(), measured = self.sizes.count(), "rebuild prefix sums");
        if self.positions_stale {
            self.rebuild_positions();
        }

        let sizes = &self.sizes;
        self.sums = Fenwick::from_measured(self.unique_ids.iter().map(|id| sizes.size_of(id)));
        debug_assert_eq!(self.sums.len(), self.unique_ids.len());
        self.sums_stale = false;
    }

    // Runs once per id list, so each duplicate is reported once.
    fn rebuild_positions(&mut self) {
        self.positions.clear();
        self.duplicate_positions.clear();
        for (index, id) in self.unique_ids.iter().enumerate() {
            if self.positions.contains_key(id) {
                vwarn!(index, "duplicate id in unique_ids");
                self.config.diagnose(Diagnostic::DuplicateId { index });
                self.duplicate_positions
                    .entry(id.clone())
                    .or_default()
                    .push(index);
            } else {
                self.positions.insert(id.clone(), index);
            }
        }
        self.positions_stale = false;
    }
}

impl<K> core::fmt::Debug for RangeEngine<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RangeEngine")
            .field("config", &self.config)
            .field("len", &self.unique_ids.len())
            .field("range", &self.range)
            .field("direction", &self.direction)
            .field("offset", &self.offset)
            .field("sums_stale", &self.sums_stale)
            .finish_non_exhaustive()
    }
}
