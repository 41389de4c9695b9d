mod crossing_gate;
mod frame;
mod history;
mod realm;

pub use crossing_gate::{CrossingGate, GateConfig, GateError};
pub use frame::DetectionFrame;
pub use history::FrameHistory;
pub use realm::Realm;
