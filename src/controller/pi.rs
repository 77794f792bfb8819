use super::gains::ControllerGains;
use serde::Serialize;

/// Accumulated integral error.
///
/// Owned by one controller; `|err_i| <= max_i` holds after every update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct IntegralState {
    err_i: f64,
}

impl IntegralState {
    fn value(&self) -> f64 {
        self.err_i
    }

    /// Add `err_p` and clamp to `[-max_i, max_i]`.
    fn accumulate(&mut self, err_p: f64, max_i: f64) -> f64 {
        self.err_i += err_p;
        if self.err_i.abs() > max_i {
            self.err_i = self.err_i.signum() * max_i;
        }
        self.err_i
    }
}

/// Result of feeding one MSV sample through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlOutput {
    pub msv: f64,
    /// Proportional error, `desired_msv - msv`
    pub err_p: f64,
    /// Integral error after this sample, already clamped
    pub err_i: f64,
    /// Exposure delta to apply, `None` inside the deadband
    pub correction: Option<f64>,
}

/// PI controller with integral clamping and a deadband.
#[derive(Debug, Clone)]
pub struct ExposureController {
    gains: ControllerGains,
    state: IntegralState,
}

impl ExposureController {
    pub fn new(gains: ControllerGains) -> Self {
        Self {
            gains,
            state: IntegralState::default(),
        }
    }

    pub fn gains(&self) -> &ControllerGains {
        &self.gains
    }

    pub fn integral_error(&self) -> f64 {
        self.state.value()
    }

    pub fn reset(&mut self) {
        self.state = IntegralState::default();
    }

    /// Advance the controller by one frame.
    ///
    /// The integral is updated before the deadband check and is never rolled
    /// back, whether or not the resulting correction is ever applied. A
    /// non-finite MSV is ignored entirely.
    pub fn update(&mut self, msv: f64) -> ControlOutput {
        if !msv.is_finite() {
            log::warn!("Ignoring non-finite msv {}", msv);
            return ControlOutput {
                msv,
                err_p: 0.0,
                err_i: self.state.value(),
                correction: None,
            };
        }

        let err_p = self.gains.desired_msv - msv;
        let err_i = self.state.accumulate(err_p, self.gains.max_i);

        let correction = if err_p.abs() <= self.gains.deadband {
            None
        } else {
            Some(self.gains.k_p * err_p + self.gains.k_i * err_i)
        };

        ControlOutput {
            msv,
            err_p,
            err_i,
            correction,
        }
    }

    /// New exposure for the given MSV, or `None` when no change is needed.
    pub fn control_step(&mut self, msv: f64, current_exposure: f64) -> Option<f64> {
        self.update(msv)
            .correction
            .map(|correction| current_exposure + correction)
    }
}

impl Default for ExposureController {
    fn default() -> Self {
        Self::new(ControllerGains::default())
    }
}
