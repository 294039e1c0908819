use crate::key::{KeyCacheKey, KeyMap};

/// Outcome of [`SizeStore::record`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Recorded {
    /// The size was non-finite or negative and was dropped.
    Ignored,
    /// First measurement for this id.
    Inserted,
    /// The id was measured before; `previous` is the overwritten value.
    Updated { previous: f64 },
}

/// Measured sizes by item id, plus a running average used as the estimate for everything else.
///
/// The average only ever reflects current values: re-measuring an id replaces its contribution
/// instead of adding to it.
#[derive(Clone, Debug)]
pub struct SizeStore<K> {
    sizes: KeyMap<K, f64>,
    total: f64,
    estimate_size: f64,
}

impl<K: KeyCacheKey> SizeStore<K> {
    /// `estimate_size` is the fallback average while nothing has been measured.
    pub fn new(estimate_size: f64) -> Self {
        Self {
            sizes: KeyMap::new(),
            total: 0.0,
            estimate_size,
        }
    }

    pub fn record(&mut self, id: K, size: f64) -> Recorded {
        if !(size.is_finite() && size >= 0.0) {
            return Recorded::Ignored;
        }
        match self.sizes.insert(id, size) {
            Some(previous) => {
                self.total += size - previous;
                Recorded::Updated { previous }
            }
            None => {
                self.total += size;
                Recorded::Inserted
            }
        }
    }

    /// The recorded size for `id`, or the running average when it has not been measured.
    pub fn estimate(&self, id: &K) -> f64 {
        self.size_of(id).unwrap_or_else(|| self.average_size())
    }

    /// The recorded size for `id`, if measured.
    pub fn size_of(&self, id: &K) -> Option<f64> {
        self.sizes.get(id).copied()
    }

    /// Number of measured ids.
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    pub fn total_measured_size(&self) -> f64 {
        self.total
    }

    pub fn average_size(&self) -> f64 {
        let n = self.sizes.len();
        if n == 0 {
            return self.estimate_size;
        }
        // Float drift from repeated deltas must never produce a negative estimate.
        (self.total / n as f64).max(0.0)
    }

    pub fn estimate_size(&self) -> f64 {
        self.estimate_size
    }

    pub fn set_estimate_size(&mut self, estimate_size: f64) {
        self.estimate_size = estimate_size;
    }

    /// Forgets every measurement. The configured estimate is kept.
    pub fn reset(&mut self) {
        self.sizes.clear();
        self.total = 0.0;
    }

    /// Iterates over the recorded sizes without allocations.
    pub fn for_each_size(&self, mut f: impl FnMut(&K, f64)) {
        for (k, v) in self.sizes.iter() {
            f(k, *v);
        }
    }
}
