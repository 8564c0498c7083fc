//! Coalescing of bursty scroll events into one recomputation per frame.
//!
//! Scroll events arrive far more often than the screen repaints. The coalescer turns any burst of
//! them into a single pending pass: only the first event of a burst asks the host for a frame, and
//! the pass that runs on that frame reads the latest scroll position, so every event absorbed in
//! between is covered by it (trailing edge).

#[derive(Debug, Default)]
/// "Run at most once per frame" gate.
pub struct FrameCoalescer {
    pending: bool,
    coalesced: u64,
}

impl FrameCoalescer {
    #[must_use]
    /// Creates an idle coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a pass as wanted.
    ///
    /// Returns `true` when the caller must request a frame, `false` when a frame is already
    /// pending and this event has been folded into it.
    pub fn schedule(&mut self) -> bool {
        if self.pending {
            self.coalesced += 1;
            false
        } else {
            self.pending = true;
            true
        }
    }

    /// Consumes the pending pass on a frame. Returns `true` when the pass should run.
    pub fn run(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Drops any pending pass without running it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    #[must_use]
    /// Whether a pass is waiting for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    /// Number of events absorbed by an already pending pass.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
