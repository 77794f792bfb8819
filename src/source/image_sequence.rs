use super::FrameSource;
use crate::errors::ExposureError;
use crate::types::Frame;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "pgm", "ppm"];

/// Plays back a directory of still images in file name order.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next_index: usize,
    interval: Duration,
    repeat: bool,
    last_delivery: Option<Instant>,
}

impl ImageSequenceSource {
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            next_index: 0,
            interval: Duration::ZERO,
            repeat: false,
            last_delivery: None,
        }
    }

    /// Collect every image file directly inside `dir`, sorted by name.
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self, ExposureError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| {
            ExposureError::Source(format!("Failed to read frame directory {:?}: {}", dir, e))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_image_file(path))
            .collect();
        paths.sort();

        log::info!("Found {} frames in {:?}", paths.len(), dir);
        Ok(Self::from_paths(paths))
    }

    /// Pace delivery to at most one frame per `interval`.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start over from the first image once the last one was delivered.
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn wait_for_slot(&mut self) {
        if let Some(last) = self.last_delivery {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last_delivery = Some(Instant::now());
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, ExposureError> {
        if self.next_index >= self.paths.len() {
            if !self.repeat || self.paths.is_empty() {
                return Ok(None);
            }
            self.next_index = 0;
        }

        let path = self.paths[self.next_index].clone();
        self.next_index += 1;
        self.wait_for_slot();

        let image = image::open(&path).map_err(|e| {
            ExposureError::Source(format!("Failed to decode {:?}: {}", path, e))
        })?;
        Frame::from_dynamic(&image).map(Some)
    }
}
