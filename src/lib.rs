//! A line-crossing counting gate for tracked object detections.
//!
//! The gate divides the plane along a bar segment into an "in" realm and
//! an "out" realm and counts, per category, the tracked objects that move
//! from one to the other between consecutive frames. Detection and
//! tracking are upstream concerns; the gate only consumes per-frame
//! records of (category, identity, position).

pub mod gate;
pub mod integration;

// Re-exported because gate configuration and frames speak nalgebra types.
pub use nalgebra;

#[cfg(feature = "render")]
pub mod render;

pub use gate::{CrossingGate, DetectionFrame, GateConfig, GateError};
pub use integration::{FrameBuilder, FrameSource, GatePipeline, IntoFrame};
