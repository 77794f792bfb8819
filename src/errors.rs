use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExposureError {
    /// Empty or malformed frame handed to the metric extractor.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),
    /// Reading or writing the exposure parameter failed.
    #[error("Exposure store unavailable: {0}")]
    ExposureStoreUnavailable(String),
    #[error("Frame source error: {0}")]
    Source(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Exposure loop lock poisoned by previous panic")]
    LockPoisoned,
}

impl ExposureError {
    /// Whether this error only costs the current frame.
    ///
    /// Per-frame errors are logged by the control loop and the next frame is
    /// processed as usual.
    pub fn skips_frame(&self) -> bool {
        !matches!(self, ExposureError::Config(_))
    }
}
