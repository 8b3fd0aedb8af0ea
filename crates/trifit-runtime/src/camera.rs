//! Camera stream guard
//!
//! A [`CameraStream`] owns the running stream of a shared device. Dropping
//! it stops the device, so the stream is released on every exit path.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};
use trifit_core::{CameraDevice, CapturedImage, TrifitResult};

/// Camera device shared between the session and whoever created it
pub type SharedCamera = Arc<Mutex<dyn CameraDevice>>;

/// Wrap a device for sharing
pub fn share_camera<C: CameraDevice + 'static>(camera: C) -> SharedCamera {
    Arc::new(Mutex::new(camera))
}

/// Running camera stream
pub struct CameraStream {
    device: SharedCamera,
}

impl CameraStream {
    /// Start the device
    pub fn acquire(device: &SharedCamera) -> TrifitResult<Self> {
        device.lock().start()?;
        info!("Camera stream acquired");
        Ok(Self {
            device: Arc::clone(device),
        })
    }

    /// Grab the current frame as a still image
    pub fn grab(&self) -> TrifitResult<CapturedImage> {
        self.device.lock().grab()
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.device.lock().stop();
        debug!("Camera stream released");
    }
}

impl std::fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraStream").finish_non_exhaustive()
    }
}
