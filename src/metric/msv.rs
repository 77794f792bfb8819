use super::brightness::brightness_channel;
use super::histogram::{Histogram, HISTOGRAM_BUCKETS};
use crate::errors::ExposureError;
use crate::types::Frame;

/// Lower bound of the MSV range (only reached by an empty histogram)
pub const MSV_MIN: f64 = 0.0;
/// Upper bound of the MSV range, an all-white frame
pub const MSV_MAX: f64 = HISTOGRAM_BUCKETS as f64;

/// Compute the mean sample value of a frame.
///
/// Every pixel lands in exactly one bucket, so in practice the result lies
/// in `[1, 5]`: 1 for an all-black frame, 5 for all-white. The weighted sum
/// is normalised by the frame's pixel count.
pub fn compute_msv(frame: &Frame) -> Result<f64, ExposureError> {
    let channel = brightness_channel(frame)?;
    let histogram = Histogram::from_channel(&channel);

    let msv = histogram.weighted_sum() as f64 / frame.pixel_count() as f64;
    log::trace!(
        "msv {:.3} from histogram {:?} ({}x{})",
        msv,
        histogram.buckets(),
        frame.width,
        frame.height
    );
    Ok(msv)
}
