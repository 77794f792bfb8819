use serde::Serialize;

/// Number of equal-width buckets spanning the 0..256 luminance range.
pub const HISTOGRAM_BUCKETS: usize = 5;

/// Five bucket luminance histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    buckets: [u64; HISTOGRAM_BUCKETS],
}

impl Histogram {
    /// Bucket a brightness plane. Bucket `i` covers `[i * 51.2, (i + 1) * 51.2)`.
    pub fn from_channel(channel: &[u8]) -> Self {
        let mut buckets = [0u64; HISTOGRAM_BUCKETS];
        for &value in channel {
            buckets[Self::bucket_of(value)] += 1;
        }
        Self { buckets }
    }

    /// Bucket index for a single 8-bit sample
    #[inline]
    pub fn bucket_of(value: u8) -> usize {
        usize::from(value) * HISTOGRAM_BUCKETS / 256
    }

    pub fn buckets(&self) -> &[u64; HISTOGRAM_BUCKETS] {
        &self.buckets
    }

    /// Σ count[i] × (i + 1), the numerator of the MSV
    pub fn weighted_sum(&self) -> u64 {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, &count)| count * (i as u64 + 1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(Histogram::bucket_of(0), 0);
        assert_eq!(Histogram::bucket_of(51), 0);
        assert_eq!(Histogram::bucket_of(52), 1);
        assert_eq!(Histogram::bucket_of(102), 1);
        assert_eq!(Histogram::bucket_of(103), 2);
        assert_eq!(Histogram::bucket_of(153), 2);
        assert_eq!(Histogram::bucket_of(154), 3);
        assert_eq!(Histogram::bucket_of(204), 3);
        assert_eq!(Histogram::bucket_of(205), 4);
        assert_eq!(Histogram::bucket_of(255), 4);
    }

    #[test]
    fn test_every_sample_lands_in_one_bucket() {
        let channel: Vec<u8> = (0..=255).collect();
        let hist = Histogram::from_channel(&channel);
        assert_eq!(hist.buckets().iter().sum::<u64>(), 256);
    }

    #[test]
    fn test_weighted_sum() {
        let hist = Histogram::from_channel(&[0, 60, 120, 180, 240]);
        assert_eq!(hist.buckets(), &[1, 1, 1, 1, 1]);
        assert_eq!(hist.weighted_sum(), 15);
    }
}
