//! Closed-loop test doubles

use crate::errors::ExposureError;
use crate::store::ExposureStore;
use crate::types::{Frame, PixelFormat};

/// A camera looking at a horizontal radiance ramp.
///
/// Pixel values scale linearly with exposure and clip at 255, so raising the
/// exposure raises the MSV until the frame saturates.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    width: u32,
    height: u32,
    exposure: f64,
    /// Scene brightness multiplier, 1.0 maps exposure 1.0 to a full ramp
    illumination: f64,
    writes: u64,
}

impl SimulatedCamera {
    pub fn new(width: u32, height: u32, exposure: f64) -> Self {
        Self {
            width,
            height,
            exposure,
            illumination: 1.0,
            writes: 0,
        }
    }

    pub fn exposure(&self) -> f64 {
        self.exposure
    }

    pub fn set_illumination(&mut self, illumination: f64) {
        self.illumination = illumination;
    }

    /// Number of exposure writes received
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Render the scene at the current exposure.
    pub fn capture(&self) -> Frame {
        let gain = (self.exposure * self.illumination).max(0.0);
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize);
        for _ in 0..self.height {
            for x in 0..self.width {
                let radiance = 255.0 * (x as f64 + 0.5) / self.width as f64;
                data.push((radiance * gain).round().clamp(0.0, 255.0) as u8);
            }
        }
        Frame {
            data,
            width: self.width,
            height: self.height,
            format: PixelFormat::Gray8,
        }
    }
}

impl ExposureStore for SimulatedCamera {
    fn get_exposure(&mut self) -> Result<f64, ExposureError> {
        Ok(self.exposure)
    }

    fn set_exposure(&mut self, exposure: f64) -> Result<(), ExposureError> {
        self.exposure = exposure;
        self.writes += 1;
        Ok(())
    }
}

/// Wraps a store and fails the calls it is told to fail.
#[derive(Debug, Clone)]
pub struct FlakyExposureStore<S> {
    inner: S,
    fail_reads: bool,
    fail_writes: bool,
}

impl<S: ExposureStore> FlakyExposureStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ExposureStore> ExposureStore for FlakyExposureStore<S> {
    fn get_exposure(&mut self) -> Result<f64, ExposureError> {
        if self.fail_reads {
            return Err(ExposureError::ExposureStoreUnavailable(
                "read timed out".to_string(),
            ));
        }
        self.inner.get_exposure()
    }

    fn set_exposure(&mut self, exposure: f64) -> Result<(), ExposureError> {
        if self.fail_writes {
            return Err(ExposureError::ExposureStoreUnavailable(
                "write timed out".to_string(),
            ));
        }
        self.inner.set_exposure(exposure)
    }
}
