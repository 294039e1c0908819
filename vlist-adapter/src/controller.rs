use std::sync::mpsc::{self, Receiver, Sender};

use vlist::{Config, Param, Range, RangeEngine};

use crate::{
    BottomRetry, Edge, ListKey, ResizeEvent, ResizeTarget, ScrollMetrics, ScrollOutcome,
    SizeReporter, Slot,
};

/// Tuning knobs for [`ListController`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerOptions {
    /// Distance from the start at which [`Edge::Top`] is reported.
    pub top_threshold: f64,
    /// Distance from the end at which [`Edge::Bottom`] is reported.
    pub bottom_threshold: f64,
    /// Delay between a bottom jump and the check that it landed.
    pub retry_delay_ms: u64,
    /// Re-issued bottom jumps before giving up.
    pub max_bottom_retries: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            top_threshold: 0.0,
            bottom_threshold: 0.0,
            retry_delay_ms: 3,
            max_bottom_retries: 60,
        }
    }
}

/// A framework-neutral controller that wraps a [`vlist::RangeEngine`] and provides the workflows
/// a list view needs around it.
///
/// This type does not hold any UI objects. Adapters drive it by:
/// - handing a [`SizeReporter`] to each rendered item and slot, then calling
///   [`Self::pump_resizes`] to apply what they reported
/// - calling [`Self::on_scroll`] when the container scrolls
/// - calling [`Self::tick`] from a timer while a scroll-to-bottom is settling
///
/// Every `scroll_to_*` method returns the offset the host should apply to its real scroll
/// container. The resulting scroll event then flows back through [`Self::on_scroll`].
pub struct ListController<K> {
    engine: RangeEngine<K>,
    options: ControllerOptions,
    tx: Sender<ResizeEvent<K>>,
    rx: Receiver<ResizeEvent<K>>,
    header_seen: bool,
    footer_seen: bool,
    retry: Option<BottomRetry>,
}

impl<K: ListKey> ListController<K> {
    pub fn new(
        config: Config,
        unique_ids: Vec<K>,
        options: ControllerOptions,
        on_range_changed: impl Fn(Range) + Send + Sync + 'static,
    ) -> Self {
        Self::from_engine(RangeEngine::new(config, unique_ids, on_range_changed), options)
    }

    pub fn from_engine(engine: RangeEngine<K>, options: ControllerOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            engine,
            options,
            tx,
            rx,
            header_seen: false,
            footer_seen: false,
            retry: None,
        }
    }

    pub fn engine(&self) -> &RangeEngine<K> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RangeEngine<K> {
        &mut self.engine
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ControllerOptions) {
        self.options = options;
    }

    pub fn range(&self) -> Range {
        self.engine.get_range()
    }

    /// The pending scroll-to-bottom check, if any.
    pub fn bottom_retry(&self) -> Option<&BottomRetry> {
        self.retry.as_ref()
    }

    /// Creates a reporter for the item with `id`.
    pub fn item_reporter(&self, id: K) -> SizeReporter<K> {
        SizeReporter::new(ResizeTarget::Item(id), self.tx.clone())
    }

    /// Creates a reporter for the header or footer slot.
    pub fn slot_reporter(&self, slot: Slot) -> SizeReporter<K> {
        SizeReporter::new(ResizeTarget::Slot(slot), self.tx.clone())
    }

    /// Applies every queued size report, in order, and passes each one to `f`.
    ///
    /// Item sizes are recorded in the engine without moving the range. Slot sizes shift the
    /// paddings right away; a resize of a slot that already reported also re-derives both
    /// paddings from the current averages.
    ///
    /// Returns the number of events applied.
    pub fn pump_resizes(&mut self, mut f: impl FnMut(&ResizeEvent<K>)) -> usize {
        let mut applied = 0usize;
        while let Ok(event) = self.rx.try_recv() {
            match &event.target {
                ResizeTarget::Item(id) => self.engine.save_size(id.clone(), event.size),
                ResizeTarget::Slot(slot) => self.apply_slot_size(*slot, event.size),
            }
            f(&event);
            applied += 1;
        }
        if applied > 0 {
            vtrace!(applied, "pump_resizes");
        }
        applied
    }

    /// Replaces the id list and re-fits the range to its new length.
    pub fn set_unique_ids(&mut self, unique_ids: Vec<K>) {
        self.engine.update_param(Param::UniqueIds(unique_ids));
        self.engine.handle_data_sources_change();
    }

    pub fn set_keeps(&mut self, keeps: usize) {
        self.engine.update_param(Param::Keeps(keeps));
        self.engine.handle_slot_size_change();
    }

    /// Forwards a scroll event to the engine and reports whether an edge was reached.
    ///
    /// Out-of-bounds readings (see [`ScrollMetrics::is_out_of_bounds`]) are dropped and yield
    /// `None`.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<ScrollOutcome> {
        if metrics.is_out_of_bounds() {
            vtrace!(
                offset = metrics.offset,
                client_size = metrics.client_size,
                scroll_size = metrics.scroll_size,
                "ignoring out-of-bounds scroll"
            );
            return None;
        }

        self.engine.handle_scroll(metrics.offset);
        let edge = if self.engine.is_front()
            && !self.engine.unique_ids().is_empty()
            && metrics.offset - self.options.top_threshold <= 0.0
        {
            Some(Edge::Top)
        } else if self.engine.is_behind()
            && metrics.offset + metrics.client_size + self.options.bottom_threshold
                >= metrics.scroll_size
        {
            Some(Edge::Bottom)
        } else {
            None
        };
        if edge.is_some() {
            vdebug!(edge = ?edge, offset = metrics.offset, "edge reached");
        }

        Some(ScrollOutcome {
            range: self.engine.get_range(),
            edge,
        })
    }

    /// Returns `offset` clamped to be non-negative and cancels any pending bottom check.
    pub fn scroll_to_offset(&mut self, offset: f64) -> f64 {
        self.retry = None;
        if offset.is_nan() { 0.0 } else { offset.max(0.0) }
    }

    /// Returns the start offset of item `index`.
    ///
    /// Targeting the last item (or past it) behaves like [`Self::scroll_to_bottom`].
    pub fn scroll_to_index(&mut self, index: usize, now_ms: u64) -> f64 {
        if index.saturating_add(1) >= self.engine.unique_ids().len() {
            return self.scroll_to_bottom(now_ms);
        }
        let offset = self.engine.get_offset(index);
        self.scroll_to_offset(offset)
    }

    /// Returns the estimated end of the content and arms a bottom check.
    ///
    /// A new call replaces any pending check.
    pub fn scroll_to_bottom(&mut self, now_ms: u64) -> f64 {
        let target = self.engine.total_size();
        self.retry = Some(BottomRetry::new(now_ms, self.options.retry_delay_ms));
        vdebug!(target, now_ms, "scroll_to_bottom");
        target
    }

    /// Advances a pending bottom check.
    ///
    /// Returns a refreshed bottom offset when the last jump fell short and should be re-issued.
    /// Returns `None` when nothing is pending, the check is not due yet, the viewport reached
    /// the end, or the attempt budget is spent.
    pub fn tick(&mut self, now_ms: u64, metrics: ScrollMetrics) -> Option<f64> {
        let retry = self.retry.as_mut()?;
        if !retry.is_due(now_ms) {
            return None;
        }
        if metrics.is_at_bottom() {
            vtrace!(attempts = retry.attempts(), "bottom reached");
            self.retry = None;
            return None;
        }
        if retry.attempts() >= self.options.max_bottom_retries {
            vwarn!(
                attempts = retry.attempts(),
                offset = metrics.offset,
                scroll_size = metrics.scroll_size,
                "giving up on scroll_to_bottom"
            );
            self.retry = None;
            return None;
        }
        retry.rearm(now_ms, self.options.retry_delay_ms);
        Some(self.engine.total_size())
    }

    /// The offset to restore when a hidden list becomes visible again.
    pub fn resume_offset(&self) -> f64 {
        self.engine.offset()
    }

    /// Number of measured items.
    pub fn measured_count(&self) -> usize {
        self.engine.size_store().count()
    }

    pub fn measured_size(&self, id: &K) -> Option<f64> {
        self.engine.size_store().size_of(id)
    }

    /// Tears the controller down. Outstanding reporters become no-ops.
    pub fn destroy(self) {
        vdebug!(pending_retry = self.retry.is_some(), "ListController::destroy");
        self.engine.destroy();
    }

    fn apply_slot_size(&mut self, slot: Slot, size: f64) {
        let seen = match slot {
            Slot::Header => {
                self.engine.update_param(Param::SlotHeaderSize(size));
                core::mem::replace(&mut self.header_seen, true)
            }
            Slot::Footer => {
                self.engine.update_param(Param::SlotFooterSize(size));
                core::mem::replace(&mut self.footer_seen, true)
            }
        };
        if seen {
            self.engine.handle_slot_size_change();
        }
    }
}

impl<K> core::fmt::Debug for ListController<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListController")
            .field("engine", &self.engine)
            .field("options", &self.options)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
