//! Interview state machine
//!
//! Four yes/no questions:
//! - swim, bike, run (abilities, each recorded once, always all asked)
//! - prior experience (decides capture vs resources)
//!
//! After the run question, any "no" among the abilities moves to the
//! encouragement screen. Both terminal
//! screens can proceed to capture.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trifit_core::{TrifitError, TrifitResult};

/// Interview step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStep {
    Swim,
    Bike,
    Run,
    PriorExperience,
    Encouragement,
    ResourceHub,
}

impl InterviewStep {
    /// Steps that take a yes/no answer, in order
    pub fn questions() -> &'static [InterviewStep] {
        &[
            InterviewStep::Swim,
            InterviewStep::Bike,
            InterviewStep::Run,
            InterviewStep::PriorExperience,
        ]
    }

    pub fn index(self) -> u8 {
        match self {
            InterviewStep::Swim => 0,
            InterviewStep::Bike => 1,
            InterviewStep::Run => 2,
            InterviewStep::PriorExperience => 3,
            InterviewStep::Encouragement => 4,
            InterviewStep::ResourceHub => 5,
        }
    }

    pub fn is_question(self) -> bool {
        self.index() <= 3
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterviewStep::Swim => "swim",
            InterviewStep::Bike => "bike",
            InterviewStep::Run => "run",
            InterviewStep::PriorExperience => "prior_experience",
            InterviewStep::Encouragement => "encouragement",
            InterviewStep::ResourceHub => "resource_hub",
        }
    }
}

/// Recorded abilities. Each field is written at most once per interview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub swim: Option<bool>,
    pub bike: Option<bool>,
    pub run: Option<bool>,
}

impl Abilities {
    fn slot(&mut self, step: InterviewStep) -> Option<&mut Option<bool>> {
        match step {
            InterviewStep::Swim => Some(&mut self.swim),
            InterviewStep::Bike => Some(&mut self.bike),
            InterviewStep::Run => Some(&mut self.run),
            _ => None,
        }
    }

    /// All three disciplines answered yes
    pub fn all_yes(&self) -> bool {
        self.swim == Some(true) && self.bike == Some(true) && self.run == Some(true)
    }

    fn record(&mut self, step: InterviewStep, answer: bool) -> TrifitResult<()> {
        if let Some(slot) = self.slot(step) {
            if slot.is_some() {
                return Err(TrifitError::AbilityAlreadyRecorded(step.as_str()));
            }
            *slot = Some(answer);
        }
        Ok(())
    }
}

/// Outcome of an answer or a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Show this step next
    Next(InterviewStep),
    /// Interview over, go to the profile form and capture
    ToCapture,
}

/// Interview state machine
#[derive(Debug, Clone)]
pub struct InterviewStateMachine {
    step: InterviewStep,
    abilities: Abilities,
    experienced: Option<bool>,
    finished: bool,
}

impl InterviewStateMachine {
    pub fn new() -> Self {
        Self {
            step: InterviewStep::Swim,
            abilities: Abilities::default(),
            experienced: None,
            finished: false,
        }
    }

    /// Current step, `None` once finished
    pub fn step(&self) -> Option<InterviewStep> {
        if self.finished {
            None
        } else {
            Some(self.step)
        }
    }

    pub fn abilities(&self) -> Abilities {
        self.abilities
    }

    pub fn experienced(&self) -> Option<bool> {
        self.experienced
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply a yes/no answer to the current question
    pub fn answer(&mut self, answer: bool) -> TrifitResult<Transition> {
        let step = self.step().ok_or(TrifitError::InterviewFinished)?;
        if !step.is_question() {
            return Err(TrifitError::InterviewFinished);
        }

        self.abilities.record(step, answer)?;
        debug!("Interview {} answered {}", step.as_str(), answer);

        let next = match step {
            InterviewStep::Swim => InterviewStep::Bike,
            InterviewStep::Bike => InterviewStep::Run,
            InterviewStep::Run if self.abilities.all_yes() => InterviewStep::PriorExperience,
            InterviewStep::Run => InterviewStep::Encouragement,
            InterviewStep::PriorExperience if answer => {
                self.experienced = Some(true);
                return Ok(self.finish());
            }
            InterviewStep::PriorExperience => {
                self.experienced = Some(false);
                InterviewStep::ResourceHub
            }
            InterviewStep::Encouragement | InterviewStep::ResourceHub => {
                return Err(TrifitError::InterviewFinished)
            }
        };

        info!("Interview moves to {}", next.as_str());
        self.step = next;
        Ok(Transition::Next(next))
    }

    /// Leave a terminal screen for capture
    pub fn proceed_to_capture(&mut self) -> TrifitResult<Transition> {
        match self.step() {
            Some(InterviewStep::Encouragement | InterviewStep::ResourceHub) => Ok(self.finish()),
            _ => Err(TrifitError::ScreenInactive("interview")),
        }
    }

    /// Encouragement links to the resource hub
    pub fn open_resources(&mut self) -> TrifitResult<Transition> {
        match self.step() {
            Some(InterviewStep::Encouragement) => {
                self.step = InterviewStep::ResourceHub;
                Ok(Transition::Next(InterviewStep::ResourceHub))
            }
            _ => Err(TrifitError::ScreenInactive("interview")),
        }
    }

    /// Back to the first question with nothing recorded
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    fn finish(&mut self) -> Transition {
        info!("Interview finished");
        self.finished = true;
        Transition::ToCapture
    }
}

impl Default for InterviewStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(answers: &[bool]) -> (InterviewStateMachine, Transition) {
        let mut machine = InterviewStateMachine::new();
        let mut last = Transition::Next(InterviewStep::Swim);
        for answer in answers {
            last = machine.answer(*answer).unwrap();
        }
        (machine, last)
    }

    #[test]
    fn test_all_yes_goes_to_capture() {
        let (machine, last) = run(&[true, true, true, true]);
        assert_eq!(last, Transition::ToCapture);
        assert!(machine.is_finished());
        assert_eq!(machine.step(), None);
        assert_eq!(
            machine.abilities(),
            Abilities {
                swim: Some(true),
                bike: Some(true),
                run: Some(true)
            }
        );
        assert_eq!(machine.experienced(), Some(true));
    }

    #[test]
    fn test_no_experience_goes_to_resources() {
        let (machine, last) = run(&[true, true, true, false]);
        assert_eq!(last, Transition::Next(InterviewStep::ResourceHub));
        assert_eq!(machine.experienced(), Some(false));
        assert!(!machine.is_finished());
    }

    #[test]
    fn test_abilities_always_all_asked() {
        let mut machine = InterviewStateMachine::new();
        assert_eq!(machine.answer(false), Ok(Transition::Next(InterviewStep::Bike)));
        assert_eq!(machine.answer(true), Ok(Transition::Next(InterviewStep::Run)));
        assert_eq!(
            machine.answer(true),
            Ok(Transition::Next(InterviewStep::Encouragement))
        );
        assert_eq!(
            machine.abilities(),
            Abilities {
                swim: Some(false),
                bike: Some(true),
                run: Some(true)
            }
        );
    }

    #[test]
    fn test_any_no_goes_to_encouragement_after_run() {
        for answers in [
            [false, true, true],
            [true, false, true],
            [true, true, false],
            [false, false, false],
        ] {
            let (machine, last) = run(&answers);
            assert_eq!(last, Transition::Next(InterviewStep::Encouragement));
            assert_eq!(machine.step(), Some(InterviewStep::Encouragement));
            assert!(!machine.abilities().all_yes());
            assert_eq!(machine.experienced(), None);
        }
    }

    #[test]
    fn test_no_answers_on_terminal_screens() {
        let (mut machine, _) = run(&[false, true, true]);
        assert_eq!(machine.answer(true), Err(TrifitError::InterviewFinished));

        let (mut machine, _) = run(&[true, true, true, false]);
        assert_eq!(machine.answer(true), Err(TrifitError::InterviewFinished));

        let (mut machine, _) = run(&[true, true, true, true]);
        assert_eq!(machine.answer(true), Err(TrifitError::InterviewFinished));
    }

    #[test]
    fn test_encouragement_paths() {
        let (mut machine, _) = run(&[true, false, true]);
        assert_eq!(
            machine.open_resources(),
            Ok(Transition::Next(InterviewStep::ResourceHub))
        );
        assert_eq!(machine.proceed_to_capture(), Ok(Transition::ToCapture));
        assert!(machine.is_finished());
    }

    #[test]
    fn test_proceed_only_from_terminal_screens() {
        let mut machine = InterviewStateMachine::new();
        assert!(machine.proceed_to_capture().is_err());
        assert!(machine.open_resources().is_err());
    }

    #[test]
    fn test_restart_clears_record() {
        let (mut machine, _) = run(&[true, true, false]);
        machine.restart();
        assert_eq!(machine.step(), Some(InterviewStep::Swim));
        assert_eq!(machine.abilities(), Abilities::default());
        assert_eq!(machine.experienced(), None);
    }
}
