//! Frame counting
//!
//! Hit caches are keyed on the frame number, so worlds need a monotonically
//! increasing counter that advances once per update pass.

use std::cell::Cell;

/// Monotonic per-world frame counter
///
/// Uses interior mutability so a world shared through `Rc` can advance it
/// from its update pass.
#[derive(Debug, Default)]
pub struct FrameCounter {
    frame: Cell<u64>,
}

impl FrameCounter {
    /// Create a new counter starting at frame 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next frame, returning the new frame number
    pub fn advance(&self) -> u64 {
        let next = self.frame.get() + 1;
        self.frame.set(next);
        next
    }

    /// Get the current frame number
    pub fn frame_number(&self) -> u64 {
        self.frame.get()
    }
}
