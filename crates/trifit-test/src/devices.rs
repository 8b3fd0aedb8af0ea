//! Scripted landmark source and fake camera

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use trifit_core::{
    CameraDevice, CapturedImage, LandmarkSource, Skeleton, TrifitError, TrifitResult,
};

/// Replays a fixed sequence of detections, then reports nobody
#[derive(Debug, Default)]
pub struct ScriptedLandmarkSource {
    frames: VecDeque<TrifitResult<Option<Skeleton>>>,
}

impl ScriptedLandmarkSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `count` frames of the same skeleton (or nobody)
    pub fn repeat(mut self, skeleton: Option<Skeleton>, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(Ok(skeleton.clone()));
        }
        self
    }

    /// Queue a transient detection failure
    pub fn fail(mut self, message: &str) -> Self {
        self.frames
            .push_back(Err(TrifitError::DetectionFailed(message.to_string())));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for ScriptedLandmarkSource {
    fn detect(&mut self) -> TrifitResult<Option<Skeleton>> {
        self.frames.pop_front().unwrap_or(Ok(None))
    }
}

/// What a [`FakeCamera`] has been asked to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraLog {
    pub starts: usize,
    pub stops: usize,
    pub grabs: usize,
    pub running: bool,
}

/// In-memory camera. Use [`FakeCamera::log`] to inspect it after it has
/// been handed to a session.
#[derive(Debug, Clone, Default)]
pub struct FakeCamera {
    log: Arc<Mutex<CameraLog>>,
    fail_start: bool,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera whose stream can never be acquired
    pub fn unavailable() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    pub fn log(&self) -> CameraLog {
        self.log.lock().clone()
    }
}

impl CameraDevice for FakeCamera {
    fn start(&mut self) -> TrifitResult<()> {
        if self.fail_start {
            return Err(TrifitError::Camera("permission denied".into()));
        }
        let mut log = self.log.lock();
        log.starts += 1;
        log.running = true;
        Ok(())
    }

    fn grab(&mut self) -> TrifitResult<CapturedImage> {
        let mut log = self.log.lock();
        if !log.running {
            return Err(TrifitError::Camera("stream not running".into()));
        }
        log.grabs += 1;
        // SOI/EOI markers only
        Ok(CapturedImage::new(vec![0xFF, 0xD8, 0xFF, 0xD9], 1280, 720))
    }

    fn stop(&mut self) {
        let mut log = self.log.lock();
        if log.running {
            log.stops += 1;
            log.running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkeletonBuilder;

    #[test]
    fn test_scripted_source_replays_then_empties() {
        let skeleton = SkeletonBuilder::well_framed().build();
        let mut source = ScriptedLandmarkSource::new()
            .repeat(Some(skeleton.clone()), 2)
            .fail("model hiccup");

        assert_eq!(source.detect().unwrap(), Some(skeleton.clone()));
        assert_eq!(source.detect().unwrap(), Some(skeleton));
        assert!(source.detect().is_err());
        assert_eq!(source.detect().unwrap(), None);
    }

    #[test]
    fn test_fake_camera_log() {
        let mut camera = FakeCamera::new();
        let observer = camera.clone();

        assert!(camera.grab().is_err());
        camera.start().unwrap();
        camera.grab().unwrap();
        camera.stop();
        camera.stop();

        assert_eq!(
            observer.log(),
            CameraLog {
                starts: 1,
                stops: 1,
                grabs: 1,
                running: false
            }
        );
    }
}
