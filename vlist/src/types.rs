use core::ops::RangeInclusive;

/// Default item identifier.
pub type ItemKey = u64;

/// The slice of the list to materialize, plus the padding standing in for everything else.
///
/// `start`/`end` are inclusive indexes into the current id list. `pad_front` covers items
/// `[0, start)` plus the header slot, `pad_behind` covers items `(end, len)` plus the footer slot.
///
/// An empty list is represented by the degenerate zero range (`start = end = 0`, no padding);
/// the owner must not render anything in that case.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: usize,
    pub end: usize, // inclusive
    pub pad_front: f64,
    pub pad_behind: f64,
}

impl Range {
    /// Number of indexes covered by `start..=end`.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// The indexes to materialize.
    ///
    /// Callers should check the list length first: the degenerate empty-list range still yields
    /// index `0`.
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Scroll direction of the last `handle_scroll` call, relative to the previous offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Moving toward the start of the list (offset decreased).
    Front,
    /// Moving toward the end of the list (offset increased).
    Behind,
    #[default]
    Static,
}

/// Names a size-valued configuration field in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigField {
    EstimateSize,
    SlotHeaderSize,
    SlotFooterSize,
}

/// A recoverable input problem that the engine clamped or ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// `keeps` must be positive.
    KeepsClamped { requested: usize, applied: usize },
    /// A size field was non-finite or out of range.
    InvalidSize {
        field: ConfigField,
        value: f64,
        applied: f64,
    },
    /// A measurement report was non-finite or negative and was dropped.
    MalformedMeasurement { size: f64 },
    /// A scroll offset was non-finite and was dropped.
    NonFiniteOffset { offset: f64 },
    /// The id list holds the same id more than once; `index` is the later occurrence.
    DuplicateId { index: usize },
}
