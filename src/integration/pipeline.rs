//! GatePipeline for combining an upstream source with a crossing gate.

use std::collections::HashMap;

use crate::gate::{CrossingGate, GateConfig, GateError};

use super::FrameSource;

/// A combined counter that bundles an upstream frame source with a gate.
///
/// This struct provides a convenient way to run end-to-end crossing
/// counting by combining any `FrameSource` with a `CrossingGate`.
pub struct GatePipeline<S: FrameSource> {
    source: S,
    gate: CrossingGate,
}

impl<S: FrameSource> GatePipeline<S> {
    /// Create a new counting pipeline with the given source and gate config.
    pub fn new(source: S, config: GateConfig) -> Result<Self, GateError> {
        Ok(Self {
            source,
            gate: CrossingGate::new(config)?,
        })
    }

    /// Process a single raw frame and return the updated counters.
    ///
    /// This method pulls the detection record for the input from the
    /// source and then updates the gate with it.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// The per-category counters after this frame, or a source error.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<&HashMap<String, u64>, S::Error> {
        let frame = self.source.next_frame(input, width, height)?;
        Ok(self.gate.update(frame))
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying gate.
    pub fn gate(&self) -> &CrossingGate {
        &self.gate
    }

    /// Get a mutable reference to the underlying gate.
    pub fn gate_mut(&mut self) -> &mut CrossingGate {
        &mut self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::DetectionFrame;
    use crate::integration::FrameBuilder;
    use nalgebra::Point2;

    struct MockSource {
        frames: Vec<DetectionFrame>,
    }

    impl FrameSource for MockSource {
        type Error = std::convert::Infallible;

        fn next_frame(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<DetectionFrame, Self::Error> {
            Ok(self.frames.remove(0))
        }
    }

    #[test]
    fn test_gate_pipeline_counts_crossing() {
        let source = MockSource {
            frames: vec![
                FrameBuilder::new().entry("ball", 0, 400.0, 280.0).build(),
                FrameBuilder::new().entry("ball", 0, 400.0, 320.0).build(),
            ],
        };

        let config = GateConfig {
            start: Some(Point2::new(0.0, 300.0)),
            end: Some(Point2::new(800.0, 300.0)),
            width: 50.0,
            monitor: vec!["ball".to_string()],
            ..GateConfig::default()
        };

        let mut pipeline = GatePipeline::new(source, config).unwrap();
        pipeline.process_frame(&[], 800, 600).unwrap();
        let counts = pipeline.process_frame(&[], 800, 600).unwrap();
        assert_eq!(counts.get("ball"), Some(&1));
    }
}
