//! Testing utilities for CrabExposure
//!
//! Synthetic frames with known MSVs, a simulated camera whose rendered
//! brightness follows its exposure, and a store that fails on demand.

pub mod simulated_camera;
pub mod synthetic_frames;

pub use simulated_camera::{FlakyExposureStore, SimulatedCamera};
pub use synthetic_frames::{bucket_ladder_frame, solid_color_frame, solid_gray_frame};
