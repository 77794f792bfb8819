use crabexposure::config::ExposureConfig;
use crabexposure::controller::ControllerGains;
use crabexposure::ExposureError;
use std::fs;

#[test]
fn test_defaults_match_controller_constants() {
    let config = ExposureConfig::default();
    assert_eq!(config.controller, ControllerGains::default());
    assert_eq!(config.controller.desired_msv, 2.0);
    assert_eq!(config.controller.deadband, 0.5);
}

#[test]
fn test_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crabexposure.toml");

    let mut config = ExposureConfig::default();
    config.camera.exposure_parameter = "exposure_value".to_string();
    config.source.frame_interval_ms = 33;
    config.save_to_file(&path).unwrap();

    let loaded = ExposureConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.camera.exposure_parameter, "exposure_value");
    assert_eq!(loaded.source.frame_interval_ms, 33);
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[controller\nk_p = ").unwrap();

    let result = ExposureConfig::load_from_file(&path);
    assert!(matches!(result, Err(ExposureError::Config(_))));
}

#[test]
fn test_invalid_values_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invalid.toml");
    fs::write(&path, "[controller]\nk_i = -0.5\n").unwrap();

    let config = ExposureConfig::load_from_file(&path).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_layered_load_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExposureConfig::load_layered(dir.path().join("missing.toml")).unwrap();
    assert_eq!(config.controller, ControllerGains::default());
    assert_eq!(config.camera.device, "/dev/video0");
}
