//! Configuration management for CrabExposure
//!
//! Provides loading, saving and validation of controller gains, camera
//! parameter names and frame source settings.

use crate::controller::ControllerGains;
use crate::errors::ExposureError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `CRABEXPOSURE_CONTROLLER__K_P=0.1`
pub const ENV_PREFIX: &str = "CRABEXPOSURE";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    pub controller: ControllerGains,
    pub camera: CameraConfig,
    pub source: SourceConfig,
}

/// Camera parameter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera device path
    pub device: String,
    /// Name of the exposure parameter to control
    pub exposure_parameter: String,
    /// Name of the camera's own auto exposure switch
    pub auto_exposure_parameter: String,
    /// Turn the camera's auto exposure off before the loop starts
    pub disable_auto_exposure: bool,
    /// Driver units per controller exposure unit
    pub exposure_scale: f64,
}

/// Frame source configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory of still frames played back in name order
    pub frames_directory: Option<String>,
    /// Minimum delay between frames in milliseconds
    pub frame_interval_ms: u64,
    /// Loop back to the first frame at the end of the directory
    pub repeat: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            exposure_parameter: "Exposure Time, Absolute".to_string(),
            auto_exposure_parameter: "Auto Exposure".to_string(),
            disable_auto_exposure: true,
            exposure_scale: 100.0,
        }
    }
}

impl ExposureConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExposureError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ExposureError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ExposureConfig = toml::from_str(&contents)
            .map_err(|e| ExposureError::Config(format!("Failed to parse config file: {}", e)))?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load the TOML file (if present) with `CRABEXPOSURE_*` environment
    /// variables layered on top.
    pub fn load_layered<P: AsRef<Path>>(path: P) -> Result<Self, ExposureError> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ExposureError::Config(format!("Failed to build config: {}", e)))?;

        let config: ExposureConfig = settings
            .try_deserialize()
            .map_err(|e| ExposureError::Config(format!("Failed to parse config: {}", e)))?;

        log::debug!("Layered configuration from {:?} and environment", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ExposureError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ExposureError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ExposureError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| ExposureError::Config(format!("Failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("crabexposure.toml")
    }

    /// Load from default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.controller.validate()?;

        if self.camera.exposure_parameter.trim().is_empty() {
            return Err("Exposure parameter name must not be empty".to_string());
        }
        if self.camera.disable_auto_exposure && self.camera.auto_exposure_parameter.trim().is_empty()
        {
            return Err("Auto exposure parameter name must not be empty".to_string());
        }
        if !(self.camera.exposure_scale.is_finite() && self.camera.exposure_scale > 0.0) {
            return Err("Exposure scale must be positive".to_string());
        }

        if let Some(dir) = &self.source.frames_directory {
            if dir.trim().is_empty() {
                return Err("Frames directory must not be empty when set".to_string());
            }
        }

        Ok(())
    }
}
