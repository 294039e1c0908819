/// A pending "are we at the bottom yet?" check armed by
/// [`crate::ListController::scroll_to_bottom`].
///
/// Items near the end may not be rendered or measured when the first jump lands, so the total
/// size the jump aimed for can still grow. The controller re-checks on every due
/// [`crate::ListController::tick`] and re-issues the jump until the viewport really touches the
/// end, or the attempt budget runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BottomRetry {
    due_ms: u64,
    attempts: u32,
}

impl BottomRetry {
    pub fn new(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            due_ms: now_ms.saturating_add(delay_ms),
            attempts: 0,
        }
    }

    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }

    /// Number of re-issued jumps so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.due_ms
    }

    pub fn rearm(&mut self, now_ms: u64, delay_ms: u64) {
        self.attempts = self.attempts.saturating_add(1);
        self.due_ms = now_ms.saturating_add(delay_ms);
    }
}
