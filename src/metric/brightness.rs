use crate::errors::ExposureError;
use crate::types::{Frame, PixelFormat};
use std::borrow::Cow;

/// Extract the brightness plane of a frame.
///
/// Gray frames are used as they are. Color frames yield the HSV value
/// channel, `max(R, G, B)`, so a saturated primary counts as bright rather
/// than landing near the bottom the way a channel average would.
pub fn brightness_channel(frame: &Frame) -> Result<Cow<'_, [u8]>, ExposureError> {
    frame.validate()?;

    match frame.format {
        PixelFormat::Gray8 => Ok(Cow::Borrowed(&frame.data)),
        PixelFormat::Rgb8 | PixelFormat::Bgr8 => Ok(Cow::Owned(
            frame
                .data
                .chunks_exact(3)
                .map(|px| px[0].max(px[1]).max(px[2]))
                .collect(),
        )),
    }
}
