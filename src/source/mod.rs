//! Frame sources
//!
//! The control loop pulls frames one at a time and processes each to
//! completion before asking for the next, so sources deliver frames in
//! arrival order.
pub mod image_sequence;

pub use image_sequence::ImageSequenceSource;

use crate::errors::ExposureError;
use crate::types::Frame;

pub trait FrameSource {
    /// Next frame, or `Ok(None)` once the source is exhausted.
    ///
    /// An error affects the current frame only; the next call moves on.
    fn next_frame(&mut self) -> Result<Option<Frame>, ExposureError>;
}

impl<T: FrameSource + ?Sized> FrameSource for &mut T {
    fn next_frame(&mut self) -> Result<Option<Frame>, ExposureError> {
        (**self).next_frame()
    }
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn next_frame(&mut self) -> Result<Option<Frame>, ExposureError> {
        (**self).next_frame()
    }
}

/// Adapts any frame iterator into a source.
pub struct IterFrameSource<I> {
    frames: I,
}

impl<I: Iterator<Item = Frame>> IterFrameSource<I> {
    pub fn new(frames: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl<I: Iterator<Item = Frame>> FrameSource for IterFrameSource<I> {
    fn next_frame(&mut self) -> Result<Option<Frame>, ExposureError> {
        Ok(self.frames.next())
    }
}
