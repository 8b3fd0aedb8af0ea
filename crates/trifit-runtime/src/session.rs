//! Session - screen flow around the interview and the capture
//!
//! Everything is synchronous and runs on one task: the frame loop calls
//! [`Session::on_frame`], user input calls the action methods, and the
//! analysis call happens outside, between [`Session::take_analysis_job`]
//! and [`Session::finish_analysis`].

use std::sync::Arc;

use tracing::{debug, info, warn};
use trifit_core::{
    AnalysisResult, CapturedImage, Clock, Skeleton, TrifitError, TrifitResult, UserProfile,
};
use trifit_visual::{
    Gesture, GestureDebouncer, GestureRecognizer, StabilityState, StabilityTracker,
};
use trifit_voice::VoiceFeedback;

use crate::prompts;
use crate::{
    CameraStream, CaptureOrchestrator, CountdownEvent, InterviewStateMachine, SessionConfig,
    SharedCamera, Transition,
};

/// Screen shown to the athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Welcome,
    Interview,
    Form,
    Camera,
    Analyzing,
    Result,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Interview => "interview",
            Screen::Form => "form",
            Screen::Camera => "camera",
            Screen::Analyzing => "analyzing",
            Screen::Result => "result",
        }
    }

    /// Screens that need the camera stream
    pub fn uses_camera(self) -> bool {
        matches!(self, Screen::Interview | Screen::Camera)
    }
}

/// What one frame did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameReport {
    /// The current screen does not process frames
    Idle,
    Interview {
        gesture: Gesture,
        /// Hold progress in [0, 100]
        progress: f32,
        transition: Option<Transition>,
    },
    Camera {
        stability: StabilityState,
        countdown: Option<CountdownEvent>,
    },
}

/// Captured still waiting for analysis
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub image: CapturedImage,
    pub profile: UserProfile,
}

/// One athlete's session
pub struct Session {
    clock: Arc<dyn Clock>,
    voice: VoiceFeedback,
    camera_device: SharedCamera,
    camera: Option<CameraStream>,
    screen: Screen,
    profile: UserProfile,
    interview: InterviewStateMachine,
    recognizer: GestureRecognizer,
    debouncer: GestureDebouncer,
    stability: StabilityTracker,
    capture: CaptureOrchestrator,
    pending: Option<AnalysisJob>,
    validation_error: Option<String>,
    result: Option<AnalysisResult>,
}

impl Session {
    pub fn new(
        config: &SessionConfig,
        clock: Arc<dyn Clock>,
        voice: VoiceFeedback,
        camera: SharedCamera,
    ) -> Self {
        Self {
            clock,
            voice,
            camera_device: camera,
            camera: None,
            screen: Screen::Welcome,
            profile: UserProfile::default(),
            interview: InterviewStateMachine::new(),
            recognizer: GestureRecognizer::new(),
            debouncer: GestureDebouncer::new(config.gesture.clone()),
            stability: StabilityTracker::new(config.stability.clone()),
            capture: CaptureOrchestrator::new(config.capture.clone()),
            pending: None,
            validation_error: None,
            result: None,
        }
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Process one pose detection (or none) for the active screen
    pub fn on_frame(&mut self, skeleton: Option<&Skeleton>) -> FrameReport {
        match self.screen {
            Screen::Interview => self.interview_frame(skeleton),
            Screen::Camera => self.camera_frame(skeleton),
            _ => FrameReport::Idle,
        }
    }

    fn interview_frame(&mut self, skeleton: Option<&Skeleton>) -> FrameReport {
        let asking = self.interview.step().is_some_and(|step| step.is_question());
        if !asking {
            return FrameReport::Idle;
        }

        let gesture = self.recognizer.classify(skeleton);
        let transition = match self.debouncer.update(gesture) {
            Some(answer) => match self.apply_answer(answer) {
                Ok(transition) => Some(transition),
                Err(e) => {
                    warn!("Gesture answer rejected: {}", e);
                    None
                }
            },
            None => None,
        };

        FrameReport::Interview {
            gesture,
            progress: self.debouncer.progress(),
            transition,
        }
    }

    fn camera_frame(&mut self, skeleton: Option<&Skeleton>) -> FrameReport {
        let update = self.stability.update(skeleton);
        if let Some(reason) = update.announcement {
            self.voice.speak(prompts::feedback(reason), false);
        }

        let countdown = self.capture.poll(self.clock.now());
        match countdown {
            Some(CountdownEvent::Tick(n)) => {
                self.voice.speak(&n.to_string(), true);
            }
            Some(CountdownEvent::Fire) => self.take_still(),
            None => {}
        }

        FrameReport::Camera {
            stability: update.state,
            countdown,
        }
    }

    fn take_still(&mut self) {
        let grabbed = match &self.camera {
            Some(stream) => stream.grab(),
            None => Err(TrifitError::Camera("stream not running".into())),
        };

        match grabbed {
            Ok(image) => {
                info!("Still captured ({}x{})", image.width, image.height);
                self.voice.speak(prompts::ANALYZING, true);
                self.pending = Some(AnalysisJob {
                    image,
                    profile: self.profile.clone(),
                });
                self.enter(Screen::Analyzing);
            }
            Err(e) => {
                warn!("Capture failed: {}", e);
                self.stability.reset();
            }
        }
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Leave the welcome screen
    pub fn start_interview(&mut self) -> TrifitResult<()> {
        self.require(Screen::Welcome)?;
        self.begin_interview();
        Ok(())
    }

    /// Answer the current question by tapping
    pub fn tap_answer(&mut self, answer: bool) -> TrifitResult<Transition> {
        self.require(Screen::Interview)?;
        if !self.interview.step().is_some_and(|step| step.is_question()) {
            return Err(TrifitError::InterviewFinished);
        }
        if self.debouncer.is_locked() {
            return Err(TrifitError::AnswerLocked);
        }
        self.apply_answer(answer)
    }

    /// From encouragement to the resource hub
    pub fn open_resources(&mut self) -> TrifitResult<Transition> {
        self.require(Screen::Interview)?;
        self.interview.open_resources()
    }

    /// From encouragement or the resource hub to the profile form
    pub fn proceed_to_form(&mut self) -> TrifitResult<()> {
        self.require(Screen::Interview)?;
        self.interview.proceed_to_capture()?;
        self.enter(Screen::Form);
        Ok(())
    }

    /// Store the profile and open the camera
    pub fn submit_profile(&mut self, profile: UserProfile) -> TrifitResult<()> {
        self.require(Screen::Form)?;
        profile.validate()?;
        self.profile = profile;
        self.open_camera();
        Ok(())
    }

    /// Start the countdown if the pose is stable; otherwise nudge
    pub fn request_capture(&mut self) -> TrifitResult<()> {
        self.require(Screen::Camera)?;

        let state = self.stability.state();
        match self.capture.request_capture(&state, self.clock.now()) {
            Ok(first) => {
                self.validation_error = None;
                self.voice.speak(&first.to_string(), true);
                Ok(())
            }
            Err(TrifitError::NotStable { reason }) => {
                let nudge = reason.map(prompts::feedback).unwrap_or(prompts::HOLD_STILL);
                self.voice.speak(nudge, true);
                Err(TrifitError::NotStable { reason })
            }
            Err(e) => Err(e),
        }
    }

    /// Navigate directly to a screen (back buttons, header links)
    pub fn navigate(&mut self, target: Screen) -> TrifitResult<()> {
        if self.screen == Screen::Analyzing {
            return Err(TrifitError::ScreenInactive(Screen::Analyzing.as_str()));
        }
        match target {
            Screen::Welcome | Screen::Form => {
                self.enter(target);
                Ok(())
            }
            Screen::Interview => self.restart(),
            Screen::Camera => {
                self.open_camera();
                Ok(())
            }
            Screen::Analyzing | Screen::Result => Err(TrifitError::ScreenInactive(target.as_str())),
        }
    }

    /// Start over from the first question. The profile is kept.
    /// Refused while a capture is being analyzed.
    pub fn restart(&mut self) -> TrifitResult<()> {
        if self.screen == Screen::Analyzing {
            return Err(TrifitError::ScreenInactive(Screen::Analyzing.as_str()));
        }
        info!("Session restarted");
        self.pending = None;
        self.result = None;
        self.validation_error = None;
        self.begin_interview();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------

    /// Take the captured still, once
    pub fn take_analysis_job(&mut self) -> Option<AnalysisJob> {
        self.pending.take()
    }

    /// Apply the analysis outcome. A rejected pose (or a failed call) goes
    /// back to the camera with a message and a fresh stability count.
    pub fn finish_analysis(&mut self, outcome: TrifitResult<AnalysisResult>) -> TrifitResult<()> {
        self.require(Screen::Analyzing)?;

        match outcome {
            Ok(result) if result.is_valid_pose => {
                info!("Analysis done: size {}", result.size_recommendation);
                self.voice
                    .speak(&prompts::analysis_complete(&result.encouragement), true);
                self.result = Some(result);
                self.enter(Screen::Result);
            }
            Ok(result) => {
                let message = result.rejection_message().to_string();
                info!("Pose rejected: {}", message);
                self.reject_capture(message);
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                self.reject_capture(prompts::ANALYSIS_FAILED.to_string());
            }
        }
        Ok(())
    }

    fn reject_capture(&mut self, message: String) {
        self.voice.speak(&message, true);
        self.validation_error = Some(message);
        self.enter(Screen::Camera);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn interview(&self) -> &InterviewStateMachine {
        &self.interview
    }

    pub fn stability(&self) -> StabilityState {
        self.stability.state()
    }

    pub fn gesture_progress(&self) -> f32 {
        self.debouncer.progress()
    }

    /// Countdown number on screen, if counting
    pub fn countdown(&self) -> Option<u32> {
        self.capture.remaining()
    }

    /// Message from the last rejected capture
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_camera_active(&self) -> bool {
        self.camera.is_some()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require(&self, screen: Screen) -> TrifitResult<()> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(TrifitError::ScreenInactive(screen.as_str()))
        }
    }

    fn begin_interview(&mut self) {
        self.interview.restart();
        self.enter(Screen::Interview);
        if let Some(step) = self.interview.step() {
            self.voice.speak(prompts::question(step), true);
        }
    }

    fn open_camera(&mut self) {
        self.enter(Screen::Camera);
        self.voice
            .speak(&prompts::welcome(self.profile.display_name()), true);
    }

    fn apply_answer(&mut self, answer: bool) -> TrifitResult<Transition> {
        let transition = self.interview.answer(answer)?;
        self.debouncer.lock();

        match transition {
            Transition::Next(step) => {
                self.voice.speak(prompts::question(step), true);
            }
            Transition::ToCapture => {
                self.voice.speak(prompts::FELLOW_TRIATHLETE, true);
                self.enter(Screen::Form);
            }
        }
        Ok(transition)
    }

    /// Switch screens. Any countdown is canceled and the camera stream is
    /// released; screens that need the camera get a fresh stream.
    fn enter(&mut self, screen: Screen) {
        if self.capture.cancel() {
            debug!("Countdown dropped leaving {}", self.screen.as_str());
        }
        self.camera = None;

        info!("Screen {} -> {}", self.screen.as_str(), screen.as_str());
        self.screen = screen;

        if screen.uses_camera() {
            match CameraStream::acquire(&self.camera_device) {
                Ok(stream) => self.camera = Some(stream),
                Err(e) => warn!("Camera unavailable: {}", e),
            }
        }

        match screen {
            Screen::Interview => self.debouncer.reset(),
            Screen::Camera => self.stability.reset(),
            _ => {}
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("screen", &self.screen)
            .field("interview", &self.interview)
            .field("stability", &self.stability.state())
            .field("countdown", &self.capture.remaining())
            .field("camera_active", &self.camera.is_some())
            .finish()
    }
}
