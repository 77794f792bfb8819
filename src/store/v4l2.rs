//! Exposure store backed by a V4L2 integer control.

use super::ExposureStore;
use crate::errors::ExposureError;
use v4l::control::{Control, Description, Value};
use v4l::Device;

/// V4L2 menu value for manual exposure (`V4L2_EXPOSURE_MANUAL`)
const V4L2_EXPOSURE_MANUAL: i64 = 1;

pub struct V4l2ExposureStore {
    device: Device,
    device_path: String,
    exposure: Description,
    scale: f64,
}

impl V4l2ExposureStore {
    /// Open `device_path` and look up the exposure control by its driver name.
    ///
    /// `scale` is the number of driver units per controller exposure unit.
    /// Driver exposure controls are integers, so corrections far below one
    /// unit would otherwise round away on every frame.
    pub fn open(
        device_path: &str,
        exposure_parameter: &str,
        scale: f64,
    ) -> Result<Self, ExposureError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ExposureError::Config(format!(
                "exposure scale must be positive, got {}",
                scale
            )));
        }

        let device = Device::with_path(device_path).map_err(|e| {
            ExposureError::ExposureStoreUnavailable(format!(
                "Failed to open {}: {}",
                device_path, e
            ))
        })?;

        let exposure = find_control(&device, exposure_parameter)?;
        log::info!(
            "Controlling '{}' on {} (range {}..={})",
            exposure.name,
            device_path,
            exposure.minimum,
            exposure.maximum
        );

        Ok(Self {
            device,
            device_path: device_path.to_string(),
            exposure,
            scale,
        })
    }

    /// Switch the camera's own auto exposure to manual mode.
    pub fn disable_auto_exposure(&mut self, auto_parameter: &str) -> Result<(), ExposureError> {
        let description = find_control(&self.device, auto_parameter)?;
        self.device
            .set_control(Control {
                id: description.id,
                value: Value::Integer(V4L2_EXPOSURE_MANUAL),
            })
            .map_err(|e| {
                ExposureError::ExposureStoreUnavailable(format!(
                    "Failed to disable '{}' on {}: {}",
                    auto_parameter, self.device_path, e
                ))
            })?;
        log::info!("Disabled camera auto exposure on {}", self.device_path);
        Ok(())
    }
}

fn find_control(device: &Device, name: &str) -> Result<Description, ExposureError> {
    let controls = device.query_controls().map_err(|e| {
        ExposureError::ExposureStoreUnavailable(format!("Failed to query controls: {}", e))
    })?;

    controls
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            ExposureError::ExposureStoreUnavailable(format!("control '{}' not found", name))
        })
}

impl ExposureStore for V4l2ExposureStore {
    fn get_exposure(&mut self) -> Result<f64, ExposureError> {
        let control = self.device.control(self.exposure.id).map_err(|e| {
            ExposureError::ExposureStoreUnavailable(format!(
                "Failed to read '{}': {}",
                self.exposure.name, e
            ))
        })?;

        match control.value {
            Value::Integer(v) => Ok(v as f64 / self.scale),
            other => Err(ExposureError::ExposureStoreUnavailable(format!(
                "'{}' is not an integer control: {:?}",
                self.exposure.name, other
            ))),
        }
    }

    fn set_exposure(&mut self, exposure: f64) -> Result<(), ExposureError> {
        let value = ((exposure * self.scale).round() as i64)
            .clamp(self.exposure.minimum, self.exposure.maximum);
        self.device
            .set_control(Control {
                id: self.exposure.id,
                value: Value::Integer(value),
            })
            .map_err(|e| {
                ExposureError::ExposureStoreUnavailable(format!(
                    "Failed to write '{}': {}",
                    self.exposure.name, e
                ))
            })
    }
}
