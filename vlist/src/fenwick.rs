use alloc::vec::Vec;
use core::cmp;

/// Prefix sums of *measured* sizes and *measured counts* over list positions.
///
/// Unmeasured positions contribute nothing to either tree; their estimate is added at query
/// time as `(items - measured) * average`, so a moving average never forces a rebuild.
///
/// Updates recompute each touched node from its children instead of applying a delta, so after
/// any sequence of [`Self::set`] calls the tree is bit-identical to [`Self::from_measured`] over
/// the same points.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    points: Vec<Option<f64>>, // 0-indexed
    sizes: Vec<f64>,    // 1-indexed
    counts: Vec<usize>, // 1-indexed
    max_bit: usize,
}

impl Fenwick {
    /// Builds the tree in `O(n)` from per-position measurements (`None` = unmeasured).
    pub(crate) fn from_measured(measured: impl ExactSizeIterator<Item = Option<f64>>) -> Self {
        let points: Vec<Option<f64>> = measured.collect();
        let n = points.len();
        let mut sizes = alloc::vec![0.0f64; n + 1];
        let mut counts = alloc::vec![0usize; n + 1];
        for i in 1..=n {
            if let Some(size) = points[i - 1] {
                sizes[i] += size;
                counts[i] += 1;
            }
            let j = i + lsb(i);
            if j <= n {
                sizes[j] += sizes[i];
                counts[j] += counts[i];
            }
        }
        Self {
            points,
            sizes,
            counts,
            max_bit: if n == 0 {
                0
            } else {
                highest_power_of_two_leq(n)
            },
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    /// Replaces the measurement at `index`. `O(log^2 n)`.
    pub(crate) fn set(&mut self, index: usize, measured: Option<f64>) {
        let n = self.len();
        if index >= n {
            return;
        }
        self.points[index] = measured;
        let mut i = index + 1;
        while i <= n {
            self.refresh_node(i);
            i += lsb(i);
        }
    }

    // Children are summed in ascending order before the node's own point, the same order
    // `from_measured` accumulates them in.
    fn refresh_node(&mut self, i: usize) {
        let mut size = 0.0f64;
        let mut count = 0usize;
        let mut step = lsb(i) >> 1;
        while step > 0 {
            size += self.sizes[i - step];
            count += self.counts[i - step];
            step >>= 1;
        }
        if let Some(point) = self.points[i - 1] {
            size += point;
            count += 1;
        }
        self.sizes[i] = size;
        self.counts[i] = count;
    }

    /// Measured size sum and measured count over the first `count` positions.
    pub(crate) fn prefix(&self, count: usize) -> (f64, usize) {
        let mut i = cmp::min(count, self.len());
        let mut size = 0.0;
        let mut measured = 0usize;
        while i > 0 {
            size += self.sizes[i];
            measured += self.counts[i];
            i &= i - 1;
        }
        (size, measured)
    }

    /// Estimated size of the first `count` positions.
    pub(crate) fn estimated_prefix(&self, count: usize, average: f64) -> f64 {
        let count = cmp::min(count, self.len());
        let (size, measured) = self.prefix(count);
        (size + (count - measured) as f64 * average).max(0.0)
    }

    /// Returns the number of leading positions whose estimated prefix sum is `<= target`.
    ///
    /// Relies on every estimated size being non-negative, which makes the prefix monotone.
    pub(crate) fn lower_bound(&self, target: f64, average: f64) -> usize {
        let n = self.len();
        if n == 0 || target < 0.0 {
            return 0;
        }

        let mut idx = 0usize;
        let mut size = 0.0f64;
        let mut measured = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n {
                let s = size + self.sizes[next];
                let m = measured + self.counts[next];
                if s + (next - m) as f64 * average <= target {
                    idx = next;
                    size = s;
                    measured = m;
                }
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
