//! Gesture Recognizer - raised-hand classification
//!
//! Stateless: the answer depends on the current frame only. Debouncing is
//! the job of [`crate::GestureDebouncer`].

use trifit_core::{Side, Skeleton};

/// Raised-hand reading for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    /// No hand raised, or both (ambiguous readings are treated as nothing)
    #[default]
    None,
    LeftRaised,
    RightRaised,
}

impl Gesture {
    /// Yes/no answer this gesture stands for
    pub fn answer(&self) -> Option<bool> {
        match self {
            Self::None => None,
            Self::LeftRaised => Some(true),
            Self::RightRaised => Some(false),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::LeftRaised => "left-raised",
            Self::RightRaised => "right-raised",
        }
    }
}

/// Raised-hand classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureRecognizer;

impl GestureRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Classify one frame
    pub fn classify(&self, skeleton: Option<&Skeleton>) -> Gesture {
        let Some(skeleton) = skeleton else {
            return Gesture::None;
        };

        match (
            is_raised(skeleton, Side::Left),
            is_raised(skeleton, Side::Right),
        ) {
            (true, false) => Gesture::LeftRaised,
            (false, true) => Gesture::RightRaised,
            _ => Gesture::None,
        }
    }
}

/// A wrist is raised when it is above both its shoulder and its elbow.
/// Screen space: smaller y is higher.
pub fn is_raised(skeleton: &Skeleton, side: Side) -> bool {
    let wrist = skeleton.get(side.wrist());
    let shoulder = skeleton.get(side.shoulder());
    let elbow = skeleton.get(side.elbow());

    wrist.y < shoulder.y && wrist.y < elbow.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use trifit_test::SkeletonBuilder;

    #[test]
    fn test_no_person() {
        assert_eq!(GestureRecognizer::new().classify(None), Gesture::None);
    }

    #[test]
    fn test_arms_down() {
        let skeleton = SkeletonBuilder::well_framed().build();
        assert_eq!(
            GestureRecognizer::new().classify(Some(&skeleton)),
            Gesture::None
        );
    }

    #[test]
    fn test_single_hand() {
        let recognizer = GestureRecognizer::new();

        let left = SkeletonBuilder::well_framed().raise(Side::Left).build();
        assert_eq!(recognizer.classify(Some(&left)), Gesture::LeftRaised);

        let right = SkeletonBuilder::well_framed().raise(Side::Right).build();
        assert_eq!(recognizer.classify(Some(&right)), Gesture::RightRaised);
    }

    #[test]
    fn test_both_hands_is_ambiguous() {
        let skeleton = SkeletonBuilder::well_framed()
            .raise(Side::Left)
            .raise(Side::Right)
            .build();
        assert_eq!(
            GestureRecognizer::new().classify(Some(&skeleton)),
            Gesture::None
        );
    }

    #[test]
    fn test_wrist_above_shoulder_but_below_elbow() {
        // Elbow flung up higher than the wrist: not a raised hand
        let skeleton = SkeletonBuilder::well_framed()
            .point(trifit_core::BodyPoint::LeftElbow, 0.30, 0.20)
            .point(trifit_core::BodyPoint::LeftWrist, 0.30, 0.30)
            .build();
        assert!(!is_raised(&skeleton, Side::Left));
    }

    #[test]
    fn test_answers() {
        assert_eq!(Gesture::LeftRaised.answer(), Some(true));
        assert_eq!(Gesture::RightRaised.answer(), Some(false));
        assert_eq!(Gesture::None.answer(), None);
    }
}
