//! Walk-cycle animation state.
//!
//! Advances one frame per update while a character walks, and restarts from
//! frame 0 when it stops or turns around.

/// Walk-cycle frame counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkCycle {
    /// Current frame index.
    pub index: usize,
    /// Number of frames in the cycle (at least 1).
    pub frame_count: usize,
}

impl WalkCycle {
    pub fn new(frame_count: usize) -> Self {
        Self {
            index: 0,
            frame_count: frame_count.max(1),
        }
    }

    /// Step to the next frame, looping at the end.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.frame_count;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
