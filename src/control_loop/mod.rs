//! Per-frame exposure control loop
//!
//! Wires a frame source, the metric extractor, the PI controller and an
//! exposure store together. Frames are processed strictly one after another;
//! a failed frame is logged and the loop moves on.
pub mod session;
pub mod shared;
pub mod stats;

pub use session::{ExposureLoop, ExposureUpdate, StepReport};
pub use shared::SharedExposureLoop;
pub use stats::LoopStats;
