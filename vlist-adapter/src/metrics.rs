use vlist::Range;

/// Geometry of the scroll container along the scroll axis, as read by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    /// Current scroll offset.
    pub offset: f64,
    /// Visible extent of the container.
    pub client_size: f64,
    /// Full scrollable extent of the content.
    pub scroll_size: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, client_size: f64, scroll_size: f64) -> Self {
        Self {
            offset,
            client_size,
            scroll_size,
        }
    }

    /// Whether the viewport touches the end of the content.
    pub fn is_at_bottom(&self) -> bool {
        self.offset + self.client_size >= self.scroll_size
    }

    /// Readings produced by overscroll spring-back or a not-yet-laid-out container.
    ///
    /// These report transient offsets that would flip the scroll direction.
    pub fn is_out_of_bounds(&self) -> bool {
        self.offset < 0.0
            || self.offset + self.client_size > self.scroll_size + 1.0
            || self.scroll_size == 0.0
    }
}

/// An end of the list the viewport reached while moving towards it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
}

/// Result of an accepted scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOutcome {
    /// The range after the scroll was applied.
    pub range: Range,
    pub edge: Option<Edge>,
}
