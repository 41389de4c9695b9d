//! Builder for assembling DetectionFrame records entry by entry.

use nalgebra::Point2;

use crate::gate::DetectionFrame;

/// Builder for assembling a [`DetectionFrame`] entry by entry.
///
/// Keeps the parallel lists in lockstep, so frames built this way always
/// carry a one-to-one identity list and never trigger the index-fallback
/// rule.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    frame: DetectionFrame,
}

impl FrameBuilder {
    /// Create a new frame builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one detection entry.
    pub fn entry(mut self, category: impl Into<String>, identity: u64, x: f32, y: f32) -> Self {
        self.frame.categories.push(category.into());
        self.frame.identities.push(identity);
        self.frame.positions.push(Point2::new(x, y));
        self
    }

    /// Record a disambiguator tag for `identity` under `category`.
    pub fn tag(mut self, category: impl Into<String>, identity: u64, tag: i64) -> Self {
        self.frame
            .tags
            .entry(category.into())
            .or_default()
            .push((identity, tag));
        self
    }

    /// Build the final [`DetectionFrame`].
    pub fn build(self) -> DetectionFrame {
        self.frame
    }
}
