use super::session::{ExposureLoop, StepReport};
use super::stats::LoopStats;
use crate::errors::ExposureError;
use crate::store::ExposureStore;
use crate::types::Frame;
use std::sync::{Arc, Mutex};

/// An exposure loop that several frame producers can feed.
///
/// Each frame holds the lock for its whole control step, so steps never
/// interleave. Frames are applied in the order the lock is acquired.
pub struct SharedExposureLoop<S> {
    inner: Arc<Mutex<ExposureLoop<S>>>,
}

impl<S> Clone for SharedExposureLoop<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ExposureStore> SharedExposureLoop<S> {
    pub fn new(exposure_loop: ExposureLoop<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(exposure_loop)),
        }
    }

    pub fn process_frame(&self, frame: &Frame) -> Result<StepReport, ExposureError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ExposureError::LockPoisoned)?;
        guard.process_frame(frame)
    }

    pub fn stats(&self) -> Result<LoopStats, ExposureError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| ExposureError::LockPoisoned)?;
        Ok(guard.stats())
    }

    pub fn integral_error(&self) -> Result<f64, ExposureError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| ExposureError::LockPoisoned)?;
        Ok(guard.controller().integral_error())
    }

    /// Run `f` with exclusive access to the underlying loop.
    pub fn with_loop<R>(
        &self,
        f: impl FnOnce(&mut ExposureLoop<S>) -> R,
    ) -> Result<R, ExposureError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ExposureError::LockPoisoned)?;
        Ok(f(&mut guard))
    }
}
