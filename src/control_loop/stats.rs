use serde::Serialize;

/// Running counters for one exposure loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    /// Frames that produced an MSV
    pub frames_processed: u64,
    /// Exposure values written to the store
    pub updates_issued: u64,
    /// Frames whose error stayed inside the deadband
    pub frames_held: u64,
    pub invalid_frames: u64,
    pub store_failures: u64,
    pub source_errors: u64,
}

impl LoopStats {
    /// Frames that reached the loop, whether or not they succeeded
    pub fn frames_seen(&self) -> u64 {
        self.frames_processed + self.invalid_frames + self.source_errors
    }
}
