//! Adapter utilities for the `vlist` crate.
//!
//! The `vlist` crate is UI-agnostic and focuses on the range math. This crate provides the
//! framework-neutral pieces a list view builds around it:
//!
//! - Size reporting: a [`SizeReporter`] per rendered item or slot, feeding a channel owned by
//!   one [`ListController`]
//! - Edge detection for "load more" style callbacks ([`Edge::Top`], [`Edge::Bottom`])
//! - Scroll-to helpers, including a bounded scroll-to-bottom retry driven by
//!   [`ListController::tick`]
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings). It requires
//! `std` for its channel.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod key;
mod metrics;
mod reporter;
mod retry;


pub use controller::{ControllerOptions, ListController};
pub use key::ListKey;
pub use metrics::{Edge, ScrollMetrics, ScrollOutcome};
pub use reporter::{ResizeEvent, ResizeTarget, SizeReporter, Slot};
pub use retry::BottomRetry;
