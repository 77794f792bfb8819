//! Frame types shared by the metric extractor, frame sources and tests.

use crate::errors::ExposureError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Pixel layout of a frame buffer, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    Bgr8,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PixelFormat::Gray8 => "GRAY8",
            PixelFormat::Rgb8 => "RGB8",
            PixelFormat::Bgr8 => "BGR8",
        }
    }
}

/// One video frame, tightly packed in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl Frame {
    /// Create a frame, checking that the buffer matches the dimensions.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, ExposureError> {
        let frame = Self {
            data,
            width,
            height,
            format,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Build a frame from a raw buffer with an explicit channel count (1 or 3).
    ///
    /// Three-channel buffers are taken as BGR, the usual camera driver order.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<Self, ExposureError> {
        let format = match channels {
            1 => PixelFormat::Gray8,
            3 => PixelFormat::Bgr8,
            other => {
                return Err(ExposureError::InvalidFrame(format!(
                    "unsupported channel count {}",
                    other
                )))
            }
        };
        Self::new(data, width, height, format)
    }

    /// Convert a decoded image. Luma images stay single channel, everything
    /// else is converted to 8-bit RGB.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, ExposureError> {
        match image {
            DynamicImage::ImageLuma8(gray) => Self::new(
                gray.as_raw().clone(),
                gray.width(),
                gray.height(),
                PixelFormat::Gray8,
            ),
            other => {
                let rgb = other.to_rgb8();
                let (width, height) = rgb.dimensions();
                Self::new(rgb.into_raw(), width, height, PixelFormat::Rgb8)
            }
        }
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Total number of pixels (rows × cols)
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_color(&self) -> bool {
        self.channels() == 3
    }

    pub fn validate(&self) -> Result<(), ExposureError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExposureError::InvalidFrame(format!(
                "empty frame {}x{}",
                self.width, self.height
            )));
        }

        let expected = self.pixel_count() * self.channels();
        if self.data.len() != expected {
            return Err(ExposureError::InvalidFrame(format!(
                "{}x{} {} frame needs {} bytes, got {}",
                self.width,
                self.height,
                self.format.as_str(),
                expected,
                self.data.len()
            )));
        }

        Ok(())
    }
}

impl TryFrom<&DynamicImage> for Frame {
    type Error = ExposureError;

    fn try_from(image: &DynamicImage) -> Result<Self, Self::Error> {
        Frame::from_dynamic(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_frame_new_checks_length() {
        assert!(Frame::new(vec![0; 12], 2, 2, PixelFormat::Rgb8).is_ok());
        assert!(Frame::new(vec![0; 11], 2, 2, PixelFormat::Rgb8).is_err());
        assert!(Frame::new(vec![0; 4], 2, 2, PixelFormat::Gray8).is_ok());
    }

    #[test]
    fn test_frame_rejects_empty() {
        let result = Frame::new(Vec::new(), 0, 10, PixelFormat::Gray8);
        assert!(matches!(result, Err(ExposureError::InvalidFrame(_))));
    }

    #[test]
    fn test_from_raw_channels() {
        let frame = Frame::from_raw(vec![0; 6], 2, 1, 3).unwrap();
        assert_eq!(frame.format, PixelFormat::Bgr8);
        assert!(frame.is_color());

        let frame = Frame::from_raw(vec![0; 2], 2, 1, 1).unwrap();
        assert_eq!(frame.format, PixelFormat::Gray8);

        assert!(Frame::from_raw(vec![0; 8], 2, 1, 4).is_err());
    }

    #[test]
    fn test_from_dynamic_gray() {
        let gray = GrayImage::from_pixel(4, 3, Luma([42]));
        let frame = Frame::from_dynamic(&DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(frame.format, PixelFormat::Gray8);
        assert_eq!(frame.pixel_count(), 12);
        assert!(frame.data.iter().all(|&v| v == 42));
    }

    #[test]
    fn test_from_dynamic_rgb() {
        let rgb = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let frame = Frame::try_from(&DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(frame.format, PixelFormat::Rgb8);
        assert_eq!(&frame.data[..3], &[10, 20, 30]);
    }
}
