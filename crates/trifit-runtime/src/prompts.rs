//! Spoken and displayed copy

use trifit_core::FeedbackReason;

use crate::InterviewStep;

pub const ENCOURAGEMENT: &str =
    "It's okay, triathlon is progressive. Start where you are, and build from there.";
pub const RESOURCES: &str = "Let's look at some resources to help you prepare for your first race.";
pub const FELLOW_TRIATHLETE: &str = "Great, a fellow triathlete! Let's find your suit.";
pub const HOLD_STILL: &str = "Hold still, I need a stable view before I can take the picture.";
pub const ANALYZING: &str = "Analyzing your profile.";
pub const ANALYSIS_FAILED: &str = "Something went wrong with the analysis. Let's take the picture again.";

/// Question asked at an interview step
pub fn question(step: InterviewStep) -> &'static str {
    match step {
        InterviewStep::Swim => "Can you swim 750 meters without stopping?",
        InterviewStep::Bike => "Can you ride a bike for 20 kilometers?",
        InterviewStep::Run => "Can you run 5 kilometers?",
        InterviewStep::PriorExperience => "Have you already finished a triathlon?",
        InterviewStep::Encouragement => ENCOURAGEMENT,
        InterviewStep::ResourceHub => RESOURCES,
    }
}

/// Coaching tip shown alongside a question
pub fn tip(step: InterviewStep) -> Option<&'static str> {
    match step {
        InterviewStep::Swim => Some("Open water is different from the pool: practice sighting."),
        InterviewStep::Bike => Some("Comfort on the saddle matters more than top speed."),
        InterviewStep::Run => Some("Running off the bike feels heavy at first. Train the transition."),
        InterviewStep::PriorExperience => {
            Some("Your first race is about finishing, not about the clock.")
        }
        InterviewStep::Encouragement | InterviewStep::ResourceHub => None,
    }
}

/// Corrective cue for a framing problem
pub fn feedback(reason: FeedbackReason) -> &'static str {
    match reason {
        FeedbackReason::PersonNotFound => "I can't see you. Step into the frame.",
        FeedbackReason::FrameCutoff => "You're cut off at the edge. Move to the center.",
        FeedbackReason::OffCenter => "Move a little toward the center.",
        FeedbackReason::TooClose => "Step back a little.",
        FeedbackReason::TooFar => "Come a little closer.",
        FeedbackReason::Tilted => "Straighten up, your shoulders are tilted.",
    }
}

/// Greeting when the camera screen opens
pub fn welcome(name: &str) -> String {
    format!(
        "Hi {}. Stand in front of the camera, arms relaxed, and press capture when the frame turns green.",
        name
    )
}

pub fn analysis_complete(encouragement: &str) -> String {
    format!("Analysis complete. {}", encouragement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_question_step_has_a_tip() {
        for step in InterviewStep::questions() {
            assert!(tip(*step).is_some());
            assert!(question(*step).ends_with('?'));
        }
        assert!(tip(InterviewStep::ResourceHub).is_none());
    }

    #[test]
    fn test_welcome_uses_name() {
        assert!(welcome("Lena").contains("Lena"));
    }
}
