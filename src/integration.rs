//! Integration module for connecting detection/tracking backends with a gate.
//!
//! This module provides traits and utilities for feeding the crossing gate
//! from any upstream detector or tracker that can describe its per-frame
//! output as a [`DetectionFrame`](crate::gate::DetectionFrame).

mod builder;
mod pipeline;
mod source;

pub use builder::FrameBuilder;
pub use pipeline::GatePipeline;
pub use source::{FrameSource, IntoFrame};
