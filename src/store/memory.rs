use super::ExposureStore;
use crate::errors::ExposureError;

/// Exposure held in process memory, with a record of every write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExposureStore {
    exposure: f64,
    writes: Vec<f64>,
    auto_exposure: bool,
}

impl InMemoryExposureStore {
    pub fn new(initial_exposure: f64) -> Self {
        Self {
            exposure: initial_exposure,
            writes: Vec::new(),
            auto_exposure: true,
        }
    }

    pub fn exposure(&self) -> f64 {
        self.exposure
    }

    /// Every value passed to `set_exposure`, oldest first
    pub fn writes(&self) -> &[f64] {
        &self.writes
    }

    /// Stand-in for an external/manual change between frames
    pub fn override_exposure(&mut self, exposure: f64) {
        self.exposure = exposure;
    }

    pub fn auto_exposure_enabled(&self) -> bool {
        self.auto_exposure
    }

    pub fn disable_auto_exposure(&mut self) -> Result<(), ExposureError> {
        self.auto_exposure = false;
        Ok(())
    }
}

impl ExposureStore for InMemoryExposureStore {
    fn get_exposure(&mut self) -> Result<f64, ExposureError> {
        Ok(self.exposure)
    }

    fn set_exposure(&mut self, exposure: f64) -> Result<(), ExposureError> {
        self.exposure = exposure;
        self.writes.push(exposure);
        Ok(())
    }
}
