//! Range computation for virtualized lists.
//!
//! For the owning-view helpers (size reporting channel, edge detection, scroll-to-bottom retry),
//! see the `vlist-adapter` crate.
//!
//! This crate maps a scroll offset and a set of (possibly unmeasured, variable) item sizes onto
//! the slice of items to materialize, plus the leading/trailing padding that stands in for
//! everything else, so the scroll container behaves as if the whole list were rendered.
//!
//! - [`SizeStore`] remembers measured sizes per item id and keeps a running average that serves
//!   as the estimate for unmeasured items.
//! - [`RangeEngine`] owns the configuration and the store, and keeps the current [`Range`] in
//!   sync with scroll offsets, measurements, data-source changes and header/footer resizes.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - scroll offsets
//! - item measurements, keyed by a stable item id
//! - the current list of item ids
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod engine;
mod fenwick;
mod key;
mod size_store;
mod types;

#[cfg(test)]
mod tests;

pub use config::{
    Config, DEFAULT_ESTIMATE_SIZE, DEFAULT_KEEPS, MIN_ESTIMATE_SIZE, OnDiagnostic,
    OnRangeChanged, Param,
};
pub use engine::RangeEngine;
pub use size_store::{Recorded, SizeStore};
pub use types::{ConfigField, Diagnostic, Direction, ItemKey, Range};

#[doc(hidden)]
pub use key::KeyCacheKey;
