use std::sync::mpsc::Sender;

/// The fixed regions rendered around the list items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    Header,
    Footer,
}

/// What a [`ResizeEvent`] measured.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeTarget<K> {
    Item(K),
    Slot(Slot),
}

/// A measured size travelling from a rendered element to its controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeEvent<K> {
    pub target: ResizeTarget<K>,
    pub size: f64,
}

/// Reports the size of one rendered element (an item or a slot) to the controller that created
/// it.
///
/// The host calls [`Self::report`] once the element is laid out and again whenever its observed
/// size may have changed. Only actual changes are forwarded. Events are queued on the owning
/// controller's channel and applied by [`crate::ListController::pump_resizes`].
#[derive(Debug)]
pub struct SizeReporter<K> {
    target: ResizeTarget<K>,
    tx: Sender<ResizeEvent<K>>,
    last: Option<f64>,
}

impl<K: Clone> SizeReporter<K> {
    pub(crate) fn new(target: ResizeTarget<K>, tx: Sender<ResizeEvent<K>>) -> Self {
        Self {
            target,
            tx,
            last: None,
        }
    }

    pub fn target(&self) -> &ResizeTarget<K> {
        &self.target
    }

    /// The last size that was successfully sent.
    pub fn last_reported(&self) -> Option<f64> {
        self.last
    }

    /// Sends `size` unless it equals the last reported size.
    ///
    /// Returns `true` if an event was queued. Once the controller is gone this is a no-op.
    pub fn report(&mut self, size: f64) -> bool {
        if self.last == Some(size) {
            return false;
        }
        let event = ResizeEvent {
            target: self.target.clone(),
            size,
        };
        if self.tx.send(event).is_err() {
            vtrace!(size, "resize receiver dropped");
            return false;
        }
        self.last = Some(size);
        true
    }
}
