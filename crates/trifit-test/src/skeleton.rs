//! Synthetic skeletons

use trifit_core::{BodyPoint, Landmark, Side, Skeleton};

/// Points the pose model reports per person
const POSE_POINTS: usize = 33;

/// Builder for synthetic skeletons
#[derive(Debug, Clone)]
pub struct SkeletonBuilder {
    points: Vec<Landmark>,
}

impl SkeletonBuilder {
    /// Athlete centered, shoulders level at a comfortable distance, arms down
    pub fn well_framed() -> Self {
        let mut points = vec![Landmark::new(0.5, 0.8); POSE_POINTS];

        for (point, x) in [
            (BodyPoint::Nose, 0.50),
            (BodyPoint::LeftEyeInner, 0.48),
            (BodyPoint::LeftEye, 0.47),
            (BodyPoint::LeftEyeOuter, 0.46),
            (BodyPoint::RightEyeInner, 0.52),
            (BodyPoint::RightEye, 0.53),
            (BodyPoint::RightEyeOuter, 0.54),
            (BodyPoint::LeftEar, 0.44),
            (BodyPoint::RightEar, 0.56),
        ] {
            points[point.index()] = Landmark::new(x, 0.20);
        }
        points[BodyPoint::MouthLeft.index()] = Landmark::new(0.48, 0.26);
        points[BodyPoint::MouthRight.index()] = Landmark::new(0.52, 0.26);

        Self { points }
            .point(BodyPoint::LeftShoulder, 0.35, 0.40)
            .point(BodyPoint::RightShoulder, 0.65, 0.41)
            .lower(Side::Left)
            .lower(Side::Right)
    }

    /// Override one point
    pub fn point(mut self, point: BodyPoint, x: f32, y: f32) -> Self {
        self.points[point.index()] = Landmark::new(x, y);
        self
    }

    /// Move both shoulders
    pub fn shoulders(self, left: (f32, f32), right: (f32, f32)) -> Self {
        self.point(BodyPoint::LeftShoulder, left.0, left.1)
            .point(BodyPoint::RightShoulder, right.0, right.1)
    }

    /// Wrist above elbow and shoulder
    pub fn raise(self, side: Side) -> Self {
        let x = self.points[side.shoulder().index()].x;
        self.point(side.elbow(), x, 0.30)
            .point(side.wrist(), x, 0.15)
    }

    /// Arm hanging at the side
    pub fn lower(self, side: Side) -> Self {
        let x = self.points[side.shoulder().index()].x;
        self.point(side.elbow(), x, 0.55)
            .point(side.wrist(), x, 0.70)
    }

    pub fn build(self) -> Skeleton {
        Skeleton::new(self.points).expect("synthetic skeletons are complete")
    }
}

/// Well-framed skeleton with the shoulders moved
pub fn skeleton_with_shoulders(left: (f32, f32), right: (f32, f32)) -> Skeleton {
    SkeletonBuilder::well_framed()
        .shoulders(left, right)
        .build()
}

/// Skeleton with the right shoulder outside the frame margin
pub fn cut_off_skeleton() -> Skeleton {
    skeleton_with_shoulders((0.40, 0.40), (0.95, 0.40))
}

/// Skeleton with visibly uneven shoulders
pub fn tilted_skeleton() -> Skeleton {
    skeleton_with_shoulders((0.35, 0.38), (0.65, 0.48))
}
