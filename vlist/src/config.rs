use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{ConfigField, Diagnostic};

/// A callback fired with the new [`crate::Range`] whenever any of its fields change.
pub type OnRangeChanged = Arc<dyn Fn(crate::Range) + Send + Sync>;

/// A callback fired when the engine clamps a configuration value or drops malformed input.
pub type OnDiagnostic = Arc<dyn Fn(Diagnostic) + Send + Sync>;

pub const DEFAULT_KEEPS: usize = 30;
pub const DEFAULT_ESTIMATE_SIZE: f64 = 50.0;

/// Smallest accepted `estimate_size`; non-positive estimates would collapse every padding to zero.
pub const MIN_ESTIMATE_SIZE: f64 = 1.0;

/// Configuration for [`crate::RangeEngine`].
///
/// All fields can be changed at runtime via [`crate::RangeEngine::update_param`].
pub struct Config {
    /// Number of items kept mounted (visible window, excluding buffers). Must be positive.
    pub keeps: usize,
    /// Extra overscan items per edge. Defaults to `keeps / 3`.
    pub buffer: usize,
    /// Size assumed for items that have not been measured while nothing is measured yet.
    pub estimate_size: f64,
    /// Size of the fixed region rendered before the list.
    pub slot_header_size: f64,
    /// Size of the fixed region rendered after the list.
    pub slot_footer_size: f64,
    /// Optional sink for clamped or ignored input.
    pub on_diagnostic: Option<OnDiagnostic>,
}

impl Config {
    pub fn new(keeps: usize, estimate_size: f64) -> Self {
        Self {
            keeps,
            buffer: keeps / 3,
            estimate_size,
            slot_header_size: 0.0,
            slot_footer_size: 0.0,
            on_diagnostic: None,
        }
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_slot_sizes(mut self, header: f64, footer: f64) -> Self {
        self.slot_header_size = header;
        self.slot_footer_size = footer;
        self
    }

    pub fn with_on_diagnostic(
        mut self,
        on_diagnostic: Option<impl Fn(Diagnostic) + Send + Sync + 'static>,
    ) -> Self {
        self.on_diagnostic = on_diagnostic.map(|f| Arc::new(f) as _);
        self
    }

    /// Items in a full window: `keeps` plus a buffer on each edge.
    pub fn window(&self) -> usize {
        self.keeps
            .saturating_add(self.buffer.saturating_mul(2))
            .max(1)
    }

    pub(crate) fn diagnose(&self, diagnostic: Diagnostic) {
        if let Some(cb) = &self.on_diagnostic {
            cb(diagnostic);
        }
    }

    /// Clamps every field into its valid domain, reporting each correction.
    pub(crate) fn sanitize(&mut self) {
        self.keeps = self.sanitize_keeps(self.keeps);
        self.estimate_size = self.sanitize_size(ConfigField::EstimateSize, self.estimate_size);
        self.slot_header_size =
            self.sanitize_size(ConfigField::SlotHeaderSize, self.slot_header_size);
        self.slot_footer_size =
            self.sanitize_size(ConfigField::SlotFooterSize, self.slot_footer_size);
    }

    pub(crate) fn sanitize_keeps(&self, keeps: usize) -> usize {
        if keeps > 0 {
            return keeps;
        }
        vwarn!(requested = keeps, applied = 1usize, "keeps must be positive");
        self.diagnose(Diagnostic::KeepsClamped {
            requested: keeps,
            applied: 1,
        });
        1
    }

    pub(crate) fn sanitize_size(&self, field: ConfigField, value: f64) -> f64 {
        let applied = match field {
            ConfigField::EstimateSize if !(value.is_finite() && value > 0.0) => MIN_ESTIMATE_SIZE,
            ConfigField::SlotHeaderSize | ConfigField::SlotFooterSize
                if !(value.is_finite() && value >= 0.0) =>
            {
                0.0
            }
            _ => return value,
        };
        vwarn!(?field, value, applied, "invalid size clamped");
        self.diagnose(Diagnostic::InvalidSize {
            field,
            value,
            applied,
        });
        applied
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_KEEPS, DEFAULT_ESTIMATE_SIZE)
    }
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Self {
            keeps: self.keeps,
            buffer: self.buffer,
            estimate_size: self.estimate_size,
            slot_header_size: self.slot_header_size,
            slot_footer_size: self.slot_footer_size,
            on_diagnostic: self.on_diagnostic.clone(),
        }
    }
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("keeps", &self.keeps)
            .field("buffer", &self.buffer)
            .field("estimate_size", &self.estimate_size)
            .field("slot_header_size", &self.slot_header_size)
            .field("slot_footer_size", &self.slot_footer_size)
            .finish_non_exhaustive()
    }
}

/// A single configuration update for [`crate::RangeEngine::update_param`].
#[derive(Clone, Debug)]
pub enum Param<K> {
    Keeps(usize),
    Buffer(usize),
    EstimateSize(f64),
    SlotHeaderSize(f64),
    SlotFooterSize(f64),
    /// Replaces the id list. Does not recompute; follow up with
    /// [`crate::RangeEngine::handle_data_sources_change`].
    UniqueIds(Vec<K>),
}
