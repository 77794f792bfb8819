//! Frames with hand-computable brightness histograms

use crate::types::{Frame, PixelFormat};

/// One representative sample per histogram bucket
pub const BUCKET_SAMPLES: [u8; 5] = [0, 60, 120, 180, 240];

/// Uniform single-channel frame
pub fn solid_gray_frame(width: u32, height: u32, value: u8) -> Frame {
    Frame {
        data: vec![value; width as usize * height as usize],
        width,
        height,
        format: PixelFormat::Gray8,
    }
}

/// Uniform RGB frame
pub fn solid_color_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
    let data = rgb
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * 3)
        .collect();
    Frame {
        data,
        width,
        height,
        format: PixelFormat::Rgb8,
    }
}

/// Gray frame whose columns step through all five buckets.
///
/// With `width` a multiple of five every bucket holds the same number of
/// pixels, giving an MSV of exactly 3.0.
pub fn bucket_ladder_frame(width: u32, height: u32) -> Frame {
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..height {
        for x in 0..width {
            data.push(BUCKET_SAMPLES[(x % 5) as usize]);
        }
    }
    Frame {
        data,
        width,
        height,
        format: PixelFormat::Gray8,
    }
}
