//! Brightness metric extraction
//!
//! Reduces a frame to its mean sample value (MSV): the population-weighted
//! average bucket index of a five bucket luminance histogram.
pub mod brightness;
pub mod histogram;
pub mod msv;

pub use brightness::brightness_channel;
pub use histogram::{Histogram, HISTOGRAM_BUCKETS};
pub use msv::{compute_msv, MSV_MAX, MSV_MIN};
