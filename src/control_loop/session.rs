use super::stats::LoopStats;
use crate::controller::{ControllerGains, ExposureController};
use crate::errors::ExposureError;
use crate::metric::compute_msv;
use crate::source::FrameSource;
use crate::store::ExposureStore;
use crate::types::Frame;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exposure change issued for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExposureUpdate {
    /// Value read back from the store right before the write
    pub previous: f64,
    pub commanded: f64,
}

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReport {
    pub sequence: u64,
    pub msv: f64,
    pub err_p: f64,
    pub err_i: f64,
    /// `None` when the error stayed inside the deadband
    pub update: Option<ExposureUpdate>,
}

/// One controller bound to one exposure store.
pub struct ExposureLoop<S> {
    controller: ExposureController,
    store: S,
    stats: LoopStats,
    sequence: u64,
}

impl<S: ExposureStore> ExposureLoop<S> {
    pub fn new(gains: ControllerGains, store: S) -> Self {
        Self {
            controller: ExposureController::new(gains),
            store,
            stats: LoopStats::default(),
            sequence: 0,
        }
    }

    pub fn controller(&self) -> &ExposureController {
        &self.controller
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Run one control step for `frame`.
    ///
    /// An invalid frame leaves the controller untouched. A store failure
    /// happens after the integral was updated, and that update stands.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<StepReport, ExposureError> {
        self.sequence += 1;
        let sequence = self.sequence;

        let msv = compute_msv(frame).inspect_err(|_| self.stats.invalid_frames += 1)?;
        self.stats.frames_processed += 1;

        let output = self.controller.update(msv);
        let mut report = StepReport {
            sequence,
            msv: output.msv,
            err_p: output.err_p,
            err_i: output.err_i,
            update: None,
        };

        let Some(correction) = output.correction else {
            self.stats.frames_held += 1;
            log::debug!(
                "frame {}: msv {:.3} err_p {:.3} err_i {:.3}, within deadband",
                sequence,
                msv,
                output.err_p,
                output.err_i
            );
            return Ok(report);
        };

        let update = self
            .apply_correction(correction)
            .inspect_err(|_| self.stats.store_failures += 1)?;
        self.stats.updates_issued += 1;
        log::info!(
            "frame {}: msv {:.3} err_p {:.3} err_i {:.3}, exposure {:.4} -> {:.4}",
            sequence,
            msv,
            output.err_p,
            output.err_i,
            update.previous,
            update.commanded
        );

        report.update = Some(update);
        Ok(report)
    }

    fn apply_correction(&mut self, correction: f64) -> Result<ExposureUpdate, ExposureError> {
        // Always re-read: the exposure may have been changed outside this loop.
        let previous = self.store.get_exposure()?;
        let commanded = previous + correction;
        self.store.set_exposure(commanded)?;
        Ok(ExposureUpdate {
            previous,
            commanded,
        })
    }

    /// Pull frames from `source` until it is exhausted or `stop` is raised.
    ///
    /// Per-frame failures are logged and skipped; only a configuration error
    /// ends the loop early.
    pub fn run<F: FrameSource>(
        &mut self,
        source: &mut F,
        stop: &AtomicBool,
    ) -> Result<LoopStats, ExposureError> {
        while !stop.load(Ordering::Relaxed) {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    log::info!("Frame source exhausted");
                    break;
                }
                Err(e) if e.skips_frame() => {
                    self.stats.source_errors += 1;
                    log::warn!("Skipping frame: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.process_frame(&frame) {
                Ok(_) => {}
                Err(e) if e.skips_frame() => log::warn!("Frame {} skipped: {}", self.sequence, e),
                Err(e) => return Err(e),
            }
        }

        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryExposureStore;
    use crate::types::PixelFormat;

    fn gray(value: u8) -> Frame {
        Frame::new(vec![value; 16], 4, 4, PixelFormat::Gray8).unwrap()
    }

    #[test]
    fn test_dark_frame_raises_exposure() {
        let store = InMemoryExposureStore::new(100.0);
        let mut exposure_loop = ExposureLoop::new(ControllerGains::default(), store);

        let report = exposure_loop.process_frame(&gray(0)).unwrap();
        let update = report.update.unwrap();
        assert_eq!(update.previous, 100.0);
        assert!(update.commanded > 100.0);
        assert_eq!(exposure_loop.store().writes().len(), 1);
    }

    #[test]
    fn test_deadband_skips_store() {
        let store = InMemoryExposureStore::new(100.0);
        let mut exposure_loop = ExposureLoop::new(ControllerGains::default(), store);

        let report = exposure_loop.process_frame(&gray(60)).unwrap();
        assert_eq!(report.msv, 2.0);
        assert!(report.update.is_none());
        assert!(exposure_loop.store().writes().is_empty());
        assert_eq!(exposure_loop.stats().frames_held, 1);
    }

    #[test]
    fn test_invalid_frame_leaves_state() {
        let store = InMemoryExposureStore::new(1.0);
        let mut exposure_loop = ExposureLoop::new(ControllerGains::default(), store);
        let bad = Frame {
            data: vec![0; 3],
            width: 2,
            height: 2,
            format: PixelFormat::Gray8,
        };

        assert!(exposure_loop.process_frame(&bad).is_err());
        assert_eq!(exposure_loop.controller().integral_error(), 0.0);
        assert_eq!(exposure_loop.stats().invalid_frames, 1);
        assert_eq!(exposure_loop.stats().frames_processed, 0);
    }

    #[test]
    fn test_stop_flag_prevents_processing() {
        let store = InMemoryExposureStore::new(1.0);
        let mut exposure_loop = ExposureLoop::new(ControllerGains::default(), store);
        let mut source = crate::source::IterFrameSource::new(vec![gray(0), gray(0)]);
        let stop = AtomicBool::new(true);

        let stats = exposure_loop.run(&mut source, &stop).unwrap();
        assert_eq!(stats.frames_seen(), 0);
    }
}
