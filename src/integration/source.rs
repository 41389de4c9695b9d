//! Trait for upstream detection/tracking backends.

use crate::gate::DetectionFrame;

/// Trait for upstream detection/tracking backends.
///
/// Implement this trait to connect any detector or tracker to a
/// [`CrossingGate`](crate::gate::CrossingGate). The gate itself performs no
/// detection; it only correlates the frames a source hands it.
///
/// # Example
///
/// ```ignore
/// use crossgate_rs::{FrameSource, DetectionFrame};
///
/// struct MyTracker {
///     // Your model here
/// }
///
/// impl FrameSource for MyTracker {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self, input: &[u8], width: u32, height: u32) -> Result<DetectionFrame, Self::Error> {
///         // Run inference + tracking and return the frame record
///         Ok(DetectionFrame::default())
///     }
/// }
/// ```
pub trait FrameSource {
    /// Error type for detection failures.
    type Error;

    /// Produce the detection record for one raw input frame.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn next_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<DetectionFrame, Self::Error>;
}

/// Helper trait for converting model-specific outputs to a [`DetectionFrame`].
///
/// Implement this for your model's output format to enable easy conversion.
pub trait IntoFrame {
    /// Convert the output into a detection frame.
    fn into_frame(self) -> DetectionFrame;
}

impl IntoFrame for DetectionFrame {
    fn into_frame(self) -> DetectionFrame {
        self
    }
}
