//! Bounded FIFO history of detection frames.

use std::collections::VecDeque;

use crate::gate::frame::DetectionFrame;

/// Fixed-bound frame history with FIFO eviction.
///
/// Crossing confirmation only ever consults the second-to-last frame, but
/// the full window is retained for callers that want to inspect it.
#[derive(Debug, Clone)]
pub struct FrameHistory {
    frames: VecDeque<DetectionFrame>,
    max_len: usize,
}

impl FrameHistory {
    pub fn new(max_len: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(max_len.min(64)),
            max_len,
        }
    }

    /// Append a frame, evicting the oldest once the bound is exceeded.
    pub fn push(&mut self, frame: DetectionFrame) {
        self.frames.push_back(frame);
        while self.frames.len() > self.max_len {
            self.frames.pop_front();
        }
    }

    /// The frame immediately preceding the current one, if retained.
    pub fn previous(&self) -> Option<&DetectionFrame> {
        let n = self.frames.len();
        if n < 2 { None } else { self.frames.get(n - 2) }
    }

    /// The last and second-to-last frames, newest first.
    pub fn last_two(&self) -> Option<(&DetectionFrame, &DetectionFrame)> {
        Some((self.frames.back()?, self.previous()?))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}
