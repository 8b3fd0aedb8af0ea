//! End-to-end session scenarios: scripted poses in, screens and speech out

use std::sync::Arc;
use std::time::Duration;

use trifit_analysis::{OfflineEstimator, RemoteAnalyzer, ResilientAnalyzer};
use trifit_core::{
    AnalysisResult, FeedbackReason, ManualClock, RaceDistance, Side, Skeleton, TrifitError,
    UserProfile,
};
use trifit_runtime::{
    prompts, share_camera, FrameReport, InterviewStep, Screen, Session, SessionConfig,
    SessionDriver, UserAction,
};
use trifit_test::{
    skeleton_with_shoulders, FakeCamera, ScriptedAnalyzer, ScriptedLandmarkSource,
    SkeletonBuilder,
};
use trifit_voice::{RecordingSink, VoiceFeedback};

const FRAME: Duration = Duration::from_millis(33);

struct Rig<A> {
    driver: SessionDriver<ScriptedLandmarkSource, A>,
    clock: ManualClock,
    sink: RecordingSink,
    camera: FakeCamera,
}

fn rig<A: trifit_analysis::AnalysisCollaborator>(
    source: ScriptedLandmarkSource,
    analyzer: A,
) -> Rig<A> {
    let config = SessionConfig::default();
    let clock = ManualClock::new();
    let sink = RecordingSink::new();
    let camera = FakeCamera::new();
    let voice = VoiceFeedback::new(
        config.voice.clone(),
        Arc::new(clock.clone()),
        Box::new(sink.clone()),
    );
    let session = Session::new(
        &config,
        Arc::new(clock.clone()),
        voice,
        share_camera(camera.clone()),
    );
    Rig {
        driver: SessionDriver::new(session, source, analyzer, config.frame_interval()),
        clock,
        sink,
        camera,
    }
}

impl<A: trifit_analysis::AnalysisCollaborator> Rig<A> {
    async fn ticks(&mut self, count: usize) -> Vec<FrameReport> {
        let mut reports = Vec::with_capacity(count);
        for _ in 0..count {
            self.clock.advance(FRAME);
            reports.push(self.driver.tick().await);
        }
        reports
    }

    fn session(&self) -> &Session {
        self.driver.session()
    }

    /// Tap through the interview (swim "no") and leave encouragement for the form
    fn to_form(&mut self) {
        self.driver.handle(UserAction::StartInterview).unwrap();
        for answer in [false, true, true] {
            // hands down between questions
            self.driver.session_mut().on_frame(None);
            self.driver.handle(UserAction::Tap(answer)).unwrap();
        }
        self.driver.handle(UserAction::ProceedToForm).unwrap();
    }
}

fn good() -> Skeleton {
    SkeletonBuilder::well_framed().build()
}

fn raised(side: Side) -> Skeleton {
    SkeletonBuilder::well_framed().raise(side).build()
}

fn athlete() -> UserProfile {
    UserProfile {
        name: "Ana".into(),
        height_cm: 168.0,
        weight_kg: 61.0,
        event: RaceDistance::Half,
        ..UserProfile::default()
    }
}

/// Four "yes" answers by raised left hand, hands lowered between questions
fn all_yes_interview() -> ScriptedLandmarkSource {
    let mut source = ScriptedLandmarkSource::new();
    for i in 0..4 {
        source = source.repeat(Some(raised(Side::Left)), 100);
        if i < 3 {
            source = source.repeat(None, 1);
        }
    }
    source
}

#[tokio::test]
async fn test_gesture_interview_to_result() {
    let source = all_yes_interview().repeat(Some(good()), 40 + 100);
    let analyzer = ScriptedAnalyzer::new();
    let mut rig = rig(source, analyzer.clone());

    rig.driver.handle(UserAction::StartInterview).unwrap();
    rig.ticks(3 * 101 + 100).await;

    assert_eq!(rig.session().screen(), Screen::Form);
    let interview = rig.session().interview();
    assert!(interview.is_finished());
    assert_eq!(interview.experienced(), Some(true));
    assert!(rig.sink.spoken().contains(&prompts::FELLOW_TRIATHLETE.to_string()));

    rig.driver.handle(UserAction::SubmitProfile(athlete())).unwrap();
    rig.ticks(40).await;
    assert!(rig.session().stability().is_stable);

    rig.driver.handle(UserAction::RequestCapture).unwrap();
    rig.ticks(100).await;

    assert_eq!(rig.session().screen(), Screen::Result);
    assert!(rig.session().result().is_some());
    assert_eq!(analyzer.calls(), vec![athlete()]);

    let log = rig.camera.log();
    assert_eq!((log.starts, log.stops, log.grabs), (2, 2, 1));
    assert!(!log.running);
    assert!(rig
        .sink
        .spoken()
        .last()
        .is_some_and(|s| s.starts_with("Analysis complete.")));
}

#[tokio::test]
async fn test_rejected_pose_requalifies_then_succeeds() {
    let source = ScriptedLandmarkSource::new().repeat(Some(good()), 400);
    let analyzer = ScriptedAnalyzer::new().reject(Some("Please step back"));
    let mut rig = rig(source, analyzer.clone());

    rig.to_form();
    rig.driver.handle(UserAction::SubmitProfile(athlete())).unwrap();

    rig.ticks(40).await;
    rig.driver.handle(UserAction::RequestCapture).unwrap();
    // the third second elapses on the 91st frame
    rig.ticks(91).await;

    assert_eq!(rig.session().screen(), Screen::Camera);
    assert_eq!(rig.session().validation_error(), Some("Please step back"));
    assert_eq!(rig.session().stability().counter, 0);

    // counter restarted, so an immediate retry is refused
    assert!(matches!(
        rig.driver.handle(UserAction::RequestCapture),
        Err(TrifitError::NotStable { .. })
    ));

    rig.ticks(40).await;
    rig.driver.handle(UserAction::RequestCapture).unwrap();
    assert_eq!(rig.session().validation_error(), None);
    rig.ticks(100).await;

    assert_eq!(rig.session().screen(), Screen::Result);
    assert_eq!(analyzer.calls().len(), 2);
    assert_eq!(rig.camera.log().grabs, 2);
}

#[tokio::test]
async fn test_leaving_during_countdown_never_grabs() {
    let source = ScriptedLandmarkSource::new().repeat(Some(good()), 300);
    let analyzer = ScriptedAnalyzer::new();
    let mut rig = rig(source, analyzer.clone());

    rig.to_form();
    rig.driver.handle(UserAction::SubmitProfile(athlete())).unwrap();
    rig.ticks(40).await;

    rig.driver.handle(UserAction::RequestCapture).unwrap();
    rig.ticks(45).await;
    assert_eq!(rig.session().countdown(), Some(2));

    rig.driver.handle(UserAction::Navigate(Screen::Form)).unwrap();
    rig.clock.advance(Duration::from_secs(5));
    rig.ticks(100).await;

    assert_eq!(rig.session().screen(), Screen::Form);
    assert_eq!(rig.session().countdown(), None);
    assert_eq!(rig.camera.log().grabs, 0);
    assert!(!rig.camera.log().running);
    assert!(analyzer.calls().is_empty());
}

#[tokio::test]
async fn test_unstable_capture_only_nudges() {
    let too_close = skeleton_with_shoulders((0.14, 0.40), (0.86, 0.40));
    let source = ScriptedLandmarkSource::new().repeat(Some(too_close), 200);
    let mut rig = rig(source, ScriptedAnalyzer::new());

    rig.to_form();
    rig.driver.handle(UserAction::SubmitProfile(athlete())).unwrap();
    rig.ticks(60).await;

    rig.sink.clear();
    let err = rig.driver.handle(UserAction::RequestCapture).unwrap_err();
    assert_eq!(
        err,
        TrifitError::NotStable {
            reason: Some(FeedbackReason::TooClose)
        }
    );
    assert_eq!(
        rig.sink.spoken(),
        vec![prompts::feedback(FeedbackReason::TooClose)]
    );

    let reports = rig.ticks(60).await;
    assert!(reports.iter().all(|r| matches!(
        r,
        FrameReport::Camera {
            countdown: None,
            ..
        }
    )));
    assert_eq!(rig.camera.log().grabs, 0);
}

#[tokio::test]
async fn test_framing_cues_respect_rate_limit() {
    let too_close = skeleton_with_shoulders((0.14, 0.40), (0.86, 0.40));
    // 10 seconds of bad framing
    let source = ScriptedLandmarkSource::new().repeat(Some(too_close), 303);
    let mut rig = rig(source, ScriptedAnalyzer::new());

    rig.to_form();
    rig.driver.handle(UserAction::SubmitProfile(athlete())).unwrap();
    rig.sink.clear();
    rig.ticks(303).await;

    let cue = prompts::feedback(FeedbackReason::TooClose);
    let spoken = rig.sink.spoken();
    assert!(spoken.iter().all(|s| s == cue));
    // first cue after the welcome's 3 s window, then every 3 s
    assert!((2..=3).contains(&spoken.len()), "spoke {} times", spoken.len());
}

#[tokio::test]
async fn test_gesture_no_then_yes_reaches_encouragement() {
    let source = ScriptedLandmarkSource::new()
        .repeat(Some(raised(Side::Right)), 100)
        .repeat(None, 1)
        .repeat(Some(raised(Side::Left)), 100)
        .repeat(None, 1)
        .repeat(Some(raised(Side::Left)), 100)
        .repeat(Some(raised(Side::Right)), 150);
    let mut rig = rig(source, ScriptedAnalyzer::new());

    rig.driver.handle(UserAction::StartInterview).unwrap();
    rig.ticks(100).await;
    assert_eq!(rig.session().interview().step(), Some(InterviewStep::Bike));

    rig.ticks(202).await;
    let interview = rig.session().interview();
    assert_eq!(interview.step(), Some(InterviewStep::Encouragement));
    assert_eq!(interview.abilities().swim, Some(false));
    assert_eq!(interview.abilities().bike, Some(true));
    assert_eq!(interview.abilities().run, Some(true));

    let reports = rig.ticks(150).await;
    assert!(reports.iter().all(|r| *r == FrameReport::Idle));

    rig.driver.handle(UserAction::OpenResources).unwrap();
    rig.driver.handle(UserAction::ProceedToForm).unwrap();
    assert_eq!(rig.session().screen(), Screen::Form);
}

#[tokio::test]
async fn test_offline_fallback_completes_session() {
    let config = trifit_analysis::AnalysisConfig {
        endpoint: "http://127.0.0.1:9/v1/analyze".into(),
        api_key: Some("test-key".into()),
        timeout_ms: 2_000,
        ..Default::default()
    };
    let remote = RemoteAnalyzer::new(&config).unwrap();
    let analyzer = ResilientAnalyzer::new(remote, OfflineEstimator::seeded(7));

    let source = ScriptedLandmarkSource::new().repeat(Some(good()), 200);
    let mut rig = rig(source, analyzer);

    rig.to_form();
    rig.driver.handle(UserAction::SubmitProfile(athlete())).unwrap();
    rig.ticks(40).await;
    rig.driver.handle(UserAction::RequestCapture).unwrap();
    rig.ticks(100).await;

    assert_eq!(rig.session().screen(), Screen::Result);
    let result: &AnalysisResult = rig.session().result().unwrap();
    assert!(result.is_valid_pose);
    assert!(!result.size_recommendation.is_empty());
}

#[tokio::test]
async fn test_restart_from_result() {
    let source = ScriptedLandmarkSource::new().repeat(Some(good()), 200);
    let mut rig = rig(source, ScriptedAnalyzer::new());

    rig.to_form();
    rig.driver.handle(UserAction::SubmitProfile(athlete())).unwrap();
    rig.ticks(40).await;
    rig.driver.handle(UserAction::RequestCapture).unwrap();
    rig.ticks(100).await;
    assert_eq!(rig.session().screen(), Screen::Result);

    rig.driver.handle(UserAction::Restart).unwrap();
    let session = rig.session();
    assert_eq!(session.screen(), Screen::Interview);
    assert!(session.result().is_none());
    assert_eq!(session.profile(), &athlete());
    assert_eq!(session.interview().step(), Some(InterviewStep::Swim));
    assert_eq!(
        rig.sink.spoken().last().map(String::as_str),
        Some(prompts::question(InterviewStep::Swim))
    );
}
