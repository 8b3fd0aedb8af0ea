//! Landmarks - normalized body keypoints from the pose model
//!
//! A landmark only lives for the frame it was detected in. The pose model
//! reports 33 points; the session only reads the upper body.

use crate::{TrifitError, TrifitResult};

/// Body point identifier, using the pose model's fixed index convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyPoint {
    // Head
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,

    // Arms
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
}

impl BodyPoint {
    /// All points a skeleton is required to carry, in index order
    pub fn all() -> &'static [BodyPoint] {
        &[
            BodyPoint::Nose,
            BodyPoint::LeftEyeInner,
            BodyPoint::LeftEye,
            BodyPoint::LeftEyeOuter,
            BodyPoint::RightEyeInner,
            BodyPoint::RightEye,
            BodyPoint::RightEyeOuter,
            BodyPoint::LeftEar,
            BodyPoint::RightEar,
            BodyPoint::MouthLeft,
            BodyPoint::MouthRight,
            BodyPoint::LeftShoulder,
            BodyPoint::RightShoulder,
            BodyPoint::LeftElbow,
            BodyPoint::RightElbow,
            BodyPoint::LeftWrist,
            BodyPoint::RightWrist,
        ]
    }

    /// Number of points a skeleton is required to carry
    pub fn count() -> usize {
        17
    }

    /// Index into the pose model's landmark array
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Body side, from the subject's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn shoulder(self) -> BodyPoint {
        match self {
            Side::Left => BodyPoint::LeftShoulder,
            Side::Right => BodyPoint::RightShoulder,
        }
    }

    pub fn elbow(self) -> BodyPoint {
        match self {
            Side::Left => BodyPoint::LeftElbow,
            Side::Right => BodyPoint::RightElbow,
        }
    }

    pub fn wrist(self) -> BodyPoint {
        match self {
            Side::Left => BodyPoint::LeftWrist,
            Side::Right => BodyPoint::RightWrist,
        }
    }
}

/// Normalized 2-D keypoint (x, y in [0, 1] of frame width/height, y grows downwards)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth, unused by the framing checks
    pub z: f32,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Validated set of landmarks for one detected person
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    points: Vec<Landmark>,
}

impl Skeleton {
    /// Validate a raw landmark array.
    ///
    /// Every point up to the right wrist must be present with finite
    /// coordinates; extra points (hips, legs) are kept but never read.
    pub fn new(points: Vec<Landmark>) -> TrifitResult<Self> {
        if points.len() < BodyPoint::count() {
            return Err(TrifitError::TooFewLandmarks {
                expected: BodyPoint::count(),
                actual: points.len(),
            });
        }

        if let Some(idx) = points[..BodyPoint::count()]
            .iter()
            .position(|p| !p.is_finite())
        {
            return Err(TrifitError::NonFiniteLandmark(idx));
        }

        Ok(Self { points })
    }

    /// Get a landmark by body point
    #[inline]
    pub fn get(&self, point: BodyPoint) -> Landmark {
        // Length checked in `new`
        self.points[point.index()]
    }

    /// (left, right) shoulders
    pub fn shoulders(&self) -> (Landmark, Landmark) {
        (
            self.get(BodyPoint::LeftShoulder),
            self.get(BodyPoint::RightShoulder),
        )
    }

    /// All raw points
    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}
