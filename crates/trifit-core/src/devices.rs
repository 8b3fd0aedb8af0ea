//! Device seams: where frames and stills come from
//!
//! The pose model and the camera are external. Sessions only see these
//! traits.

use crate::{CapturedImage, Skeleton, TrifitResult};

/// Per-frame skeleton producer (the pose model)
pub trait LandmarkSource: Send {
    /// Detect the person in the current frame.
    ///
    /// `Ok(None)` means nobody was found. Errors are transient and callers
    /// treat them exactly like `Ok(None)`.
    fn detect(&mut self) -> TrifitResult<Option<Skeleton>>;
}

/// Camera producing the video stream and still captures
pub trait CameraDevice: Send {
    /// Acquire the media stream
    fn start(&mut self) -> TrifitResult<()>;

    /// Grab one still from the running stream
    fn grab(&mut self) -> TrifitResult<CapturedImage>;

    /// Release the media stream. Must be safe to call when already stopped.
    fn stop(&mut self);
}
