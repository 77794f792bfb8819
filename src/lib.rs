//! CrabExposure: histogram-driven automatic exposure control
//!
//! Keeps a live camera's brightness distribution centred by feeding a
//! per-frame brightness metric through a bounded PI controller and nudging
//! the camera's exposure parameter when the error leaves a deadband.
//!
//! # Pipeline
//! - [`metric::compute_msv`]: frame → five bucket histogram → mean sample value
//! - [`controller::ExposureController`]: MSV → clamped integral → optional correction
//! - [`store::ExposureStore`]: read the current exposure, write the new one
//! - [`control_loop::ExposureLoop`]: one serial step per frame
//!
//! # Usage
//! ```rust,ignore
//! use crabexposure::{ControllerGains, ExposureLoop, InMemoryExposureStore};
//!
//! let mut exposure_loop = ExposureLoop::new(ControllerGains::default(), InMemoryExposureStore::new(100.0));
//! let report = exposure_loop.process_frame(&frame)?;
//! ```
pub mod config;
pub mod control_loop;
pub mod controller;
pub mod errors;
pub mod metric;
pub mod source;
pub mod store;
pub mod types;

// Testing utilities - synthetic frames and simulated cameras
pub mod testing;

// Re-exports for convenience
pub use config::ExposureConfig;
pub use control_loop::{ExposureLoop, LoopStats, SharedExposureLoop, StepReport};
pub use controller::{ControllerGains, ExposureController};
pub use errors::ExposureError;
pub use metric::compute_msv;
pub use source::{FrameSource, ImageSequenceSource};
pub use store::{ExposureStore, InMemoryExposureStore};
pub use types::{Frame, PixelFormat};

/// Initialize logging for the exposure controller
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "crabexposure=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
        v4l2: cfg!(all(feature = "v4l2", target_os = "linux")),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Whether the V4L2 exposure store was compiled in
    pub v4l2: bool,
}
