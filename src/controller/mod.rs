//! Bounded PI exposure controller
//!
//! Turns a per-frame MSV into an optional exposure correction. The only
//! state carried between frames is the clamped integral error.
pub mod gains;
pub mod pi;

pub use gains::{
    ControllerGains, DEFAULT_DEADBAND, DEFAULT_DESIRED_MSV, DEFAULT_K_I, DEFAULT_K_P,
    DEFAULT_MAX_I,
};
pub use pi::{ControlOutput, ExposureController};
