//! Exposure parameter stores
//!
//! The controller only needs to read the camera's current exposure and write
//! a new one. Anything that can do both, a driver control, a remote
//! configuration service or a test double, implements [`ExposureStore`].
pub mod memory;
#[cfg(all(feature = "v4l2", target_os = "linux"))]
pub mod v4l2;

pub use memory::InMemoryExposureStore;
#[cfg(all(feature = "v4l2", target_os = "linux"))]
pub use v4l2::V4l2ExposureStore;

use crate::errors::ExposureError;

/// Read/write access to a camera's exposure parameter.
///
/// Both calls may fail with [`ExposureError::ExposureStoreUnavailable`].
pub trait ExposureStore {
    fn get_exposure(&mut self) -> Result<f64, ExposureError>;
    fn set_exposure(&mut self, exposure: f64) -> Result<(), ExposureError>;
}

impl<T: ExposureStore + ?Sized> ExposureStore for &mut T {
    fn get_exposure(&mut self) -> Result<f64, ExposureError> {
        (**self).get_exposure()
    }

    fn set_exposure(&mut self, exposure: f64) -> Result<(), ExposureError> {
        (**self).set_exposure(exposure)
    }
}

impl<T: ExposureStore + ?Sized> ExposureStore for Box<T> {
    fn get_exposure(&mut self) -> Result<f64, ExposureError> {
        (**self).get_exposure()
    }

    fn set_exposure(&mut self, exposure: f64) -> Result<(), ExposureError> {
        (**self).set_exposure(exposure)
    }
}
