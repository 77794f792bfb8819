//! Exposure controller behaviour

use crabexposure::controller::{ControllerGains, ExposureController};

const EPS: f64 = 1e-9;

#[test]
fn test_first_step_from_black_scene() {
    let mut controller = ExposureController::default();
    let new_exposure = controller.control_step(0.0, 100.0).unwrap();
    assert!((new_exposure - 100.12).abs() < EPS, "got {}", new_exposure);
}

#[test]
fn test_integral_moves_by_err_p_until_clamped() {
    let mut controller = ExposureController::default();
    let msv = 1.2; // err_p = 0.8
    let mut previous = controller.integral_error();
    let mut outputs = Vec::new();

    for _ in 0..3 {
        let out = controller.update(msv);
        assert!((out.err_i - previous - 0.8).abs() < EPS);
        assert!(out.err_i > previous);
        previous = out.err_i;
        outputs.push(out.correction.unwrap());
    }

    // Same input, growing integral: corrections differ call to call
    assert!(outputs[1] > outputs[0]);
    assert!(outputs[2] > outputs[1]);

    // 4th call would reach 3.2, clamped to 3.0
    let out = controller.update(msv);
    assert_eq!(out.err_i, 3.0);
    let out = controller.update(msv);
    assert_eq!(out.err_i, 3.0);
}

#[test]
fn test_integral_decreases_for_bright_scene() {
    let mut controller = ExposureController::default();
    controller.update(3.0);
    assert!((controller.integral_error() + 1.0).abs() < EPS);
    controller.update(3.0);
    assert!((controller.integral_error() + 2.0).abs() < EPS);
}

#[test]
fn test_integral_never_exceeds_bound() {
    let mut controller = ExposureController::default();
    for _ in 0..1000 {
        controller.update(5.0);
        assert!(controller.integral_error().abs() <= 3.0);
    }
    assert_eq!(controller.integral_error(), -3.0);
}

#[test]
fn test_deadband_ignores_integral() {
    let mut controller = ExposureController::default();
    for _ in 0..10 {
        controller.update(0.0);
    }
    assert_eq!(controller.integral_error(), 3.0);

    assert!(controller.control_step(2.3, 50.0).is_none());
    assert!(controller.control_step(1.7, 50.0).is_none());
}

#[test]
fn test_correction_is_relative_to_given_exposure() {
    let mut a = ExposureController::default();
    let mut b = ExposureController::default();
    let from_ten = a.control_step(4.0, 10.0).unwrap();
    let from_twenty = b.control_step(4.0, 20.0).unwrap();
    assert!((from_twenty - from_ten - 10.0).abs() < EPS);
    assert!(from_ten < 10.0);
}

#[test]
fn test_custom_gains() {
    let gains = ControllerGains {
        desired_msv: 2.5,
        k_p: 1.0,
        k_i: 0.0,
        max_i: 1.0,
        deadband: 0.0,
    };
    let mut controller = ExposureController::new(gains);
    let exposure = controller.control_step(2.0, 0.0).unwrap();
    assert!((exposure - 0.5).abs() < EPS);
    assert_eq!(controller.integral_error(), 0.5);
}

#[test]
fn test_independent_controllers_do_not_share_state() {
    let mut left = ExposureController::default();
    let right = ExposureController::default();
    left.update(0.0);
    assert_eq!(right.integral_error(), 0.0);
}
