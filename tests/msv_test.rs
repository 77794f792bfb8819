//! Brightness metric tests against the public API

use crabexposure::metric::{brightness_channel, compute_msv, Histogram};
use crabexposure::testing::{bucket_ladder_frame, solid_color_frame, solid_gray_frame};
use crabexposure::types::{Frame, PixelFormat};
use crabexposure::ExposureError;
use image::{DynamicImage, Rgb, RgbImage};

const EPS: f64 = 1e-12;

#[test]
fn test_all_black_frame_is_one() {
    let msv = compute_msv(&solid_gray_frame(64, 48, 0)).unwrap();
    assert!((msv - 1.0).abs() < EPS);

    let msv = compute_msv(&solid_color_frame(64, 48, [0, 0, 0])).unwrap();
    assert!((msv - 1.0).abs() < EPS);
}

#[test]
fn test_all_white_frame_is_five() {
    let msv = compute_msv(&solid_gray_frame(64, 48, 255)).unwrap();
    assert!((msv - 5.0).abs() < EPS);

    let msv = compute_msv(&solid_color_frame(64, 48, [255, 255, 255])).unwrap();
    assert!((msv - 5.0).abs() < EPS);
}

#[test]
fn test_uniform_bucket_distribution_is_three() {
    let frame = bucket_ladder_frame(40, 12);
    let channel = brightness_channel(&frame).unwrap();
    let histogram = Histogram::from_channel(&channel);
    assert_eq!(histogram.buckets(), &[96, 96, 96, 96, 96]);

    let msv = compute_msv(&frame).unwrap();
    assert!((msv - 3.0).abs() < EPS);
}

#[test]
fn test_saturated_color_counts_as_bright() {
    // HSV value of pure red is 255; a channel average would give 85.
    let msv = compute_msv(&solid_color_frame(10, 10, [255, 0, 0])).unwrap();
    assert!((msv - 5.0).abs() < EPS);

    let msv = compute_msv(&solid_color_frame(10, 10, [0, 0, 255])).unwrap();
    assert!((msv - 5.0).abs() < EPS);
}

#[test]
fn test_channel_order_does_not_matter() {
    let bgr = Frame::new(vec![10, 200, 30].repeat(16), 4, 4, PixelFormat::Bgr8).unwrap();
    let rgb = Frame::new(vec![30, 200, 10].repeat(16), 4, 4, PixelFormat::Rgb8).unwrap();
    assert_eq!(compute_msv(&bgr).unwrap(), compute_msv(&rgb).unwrap());
}

#[test]
fn test_decoded_image_matches_raw_frame() {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([120, 20, 20])));
    let frame = Frame::from_dynamic(&image).unwrap();
    let msv = compute_msv(&frame).unwrap();
    assert!((msv - 3.0).abs() < EPS);
}

#[test]
fn test_msv_is_pure() {
    let frame = bucket_ladder_frame(25, 5);
    let before = frame.clone();
    let first = compute_msv(&frame).unwrap();
    let second = compute_msv(&frame).unwrap();
    assert_eq!(first, second);
    assert_eq!(frame, before);
}

#[test]
fn test_invalid_frames_are_errors() {
    let empty = Frame {
        data: Vec::new(),
        width: 0,
        height: 0,
        format: PixelFormat::Gray8,
    };
    assert!(matches!(
        compute_msv(&empty),
        Err(ExposureError::InvalidFrame(_))
    ));

    let truncated = Frame {
        data: vec![0; 10],
        width: 4,
        height: 4,
        format: PixelFormat::Rgb8,
    };
    assert!(matches!(
        compute_msv(&truncated),
        Err(ExposureError::InvalidFrame(_))
    ));
}
