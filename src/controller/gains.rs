use crate::metric::{MSV_MAX, MSV_MIN};
use serde::{Deserialize, Serialize};

/// Target MSV. The midpoint is 2.5; 2.0 keeps highlights from clipping.
pub const DEFAULT_DESIRED_MSV: f64 = 2.0;
pub const DEFAULT_K_P: f64 = 0.05;
pub const DEFAULT_K_I: f64 = 0.01;
/// Integral error is clamped to `[-max_i, max_i]`
pub const DEFAULT_MAX_I: f64 = 3.0;
/// No exposure change while `|err_p|` stays at or below this
pub const DEFAULT_DEADBAND: f64 = 0.5;

/// Controller constants.
///
/// The defaults are empirically tuned; changing `desired_msv` usually means
/// retuning the gains as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerGains {
    pub desired_msv: f64,
    pub k_p: f64,
    pub k_i: f64,
    pub max_i: f64,
    pub deadband: f64,
}

impl Default for ControllerGains {
    fn default() -> Self {
        Self {
            desired_msv: DEFAULT_DESIRED_MSV,
            k_p: DEFAULT_K_P,
            k_i: DEFAULT_K_I,
            max_i: DEFAULT_MAX_I,
            deadband: DEFAULT_DEADBAND,
        }
    }
}

impl ControllerGains {
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("desired_msv", self.desired_msv),
            ("k_p", self.k_p),
            ("k_i", self.k_i),
            ("max_i", self.max_i),
            ("deadband", self.deadband),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} must be finite", name));
            }
            if value < 0.0 {
                return Err(format!("{} must not be negative", name));
            }
        }

        if !(MSV_MIN..=MSV_MAX).contains(&self.desired_msv) {
            return Err(format!(
                "desired_msv must be between {} and {}",
                MSV_MIN, MSV_MAX
            ));
        }

        Ok(())
    }
}
