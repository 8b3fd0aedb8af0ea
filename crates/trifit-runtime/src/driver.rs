//! Session driver - the frame loop
//!
//! One task owns the [`Session`]. A fixed-rate tick pulls a detection from
//! the landmark source and feeds it to the session; user actions arrive on
//! a channel between ticks. The analysis call is the only await that
//! suspends the loop, and no frames are processed while it runs.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};
use trifit_analysis::AnalysisCollaborator;
use trifit_core::{LandmarkSource, TrifitResult, UserProfile};

use crate::{FrameReport, Screen, Session};

/// Input from the athlete
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    StartInterview,
    /// Tap answer: `true` is yes
    Tap(bool),
    OpenResources,
    ProceedToForm,
    SubmitProfile(UserProfile),
    RequestCapture,
    Navigate(Screen),
    Restart,
    /// Stop the loop
    Shutdown,
}

/// Loop counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub ticks: u64,
    pub frames: u64,
    pub detection_errors: u64,
    pub actions: u64,
    pub rejected_actions: u64,
    pub analyses: u64,
}

/// Runs a session against a landmark source and an analysis collaborator
pub struct SessionDriver<L, A> {
    session: Session,
    source: L,
    analyzer: A,
    frame_interval: Duration,
    stats: DriverStats,
}

impl<L, A> SessionDriver<L, A>
where
    L: LandmarkSource,
    A: AnalysisCollaborator,
{
    pub fn new(session: Session, source: L, analyzer: A, frame_interval: Duration) -> Self {
        Self {
            session,
            source,
            analyzer,
            frame_interval,
            stats: DriverStats::default(),
        }
    }

    /// Run until [`UserAction::Shutdown`] arrives or every sender is gone
    pub async fn run(&mut self, mut actions: mpsc::Receiver<UserAction>) {
        let mut ticker = time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Session loop started ({:?} per frame)", self.frame_interval);

        loop {
            tokio::select! {
                biased;

                action = actions.recv() => match action {
                    Some(UserAction::Shutdown) | None => break,
                    Some(action) => {
                        self.handle(action).ok();
                    }
                },
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        info!(
            "Session loop stopped after {} ticks on the {} screen",
            self.stats.ticks,
            self.session.screen().as_str()
        );
    }

    /// One frame: detect, update the session, run a pending analysis
    pub async fn tick(&mut self) -> FrameReport {
        self.stats.ticks += 1;

        let report = if self.session.screen().uses_camera() {
            let skeleton = match self.source.detect() {
                Ok(skeleton) => skeleton,
                Err(e) => {
                    self.stats.detection_errors += 1;
                    debug!("Detection failed, treating as empty frame: {}", e);
                    None
                }
            };
            self.stats.frames += 1;
            self.session.on_frame(skeleton.as_ref())
        } else {
            FrameReport::Idle
        };

        if let Some(job) = self.session.take_analysis_job() {
            self.stats.analyses += 1;
            let outcome = self.analyzer.analyze(&job.image, &job.profile).await;
            if let Err(e) = self.session.finish_analysis(outcome) {
                warn!("Analysis outcome dropped: {}", e);
            }
        }

        report
    }

    /// Apply one user action
    pub fn handle(&mut self, action: UserAction) -> TrifitResult<()> {
        self.stats.actions += 1;
        debug!("Action {:?} on {}", action, self.session.screen().as_str());

        let result = match action {
            UserAction::StartInterview => self.session.start_interview(),
            UserAction::Tap(answer) => self.session.tap_answer(answer).map(|_| ()),
            UserAction::OpenResources => self.session.open_resources().map(|_| ()),
            UserAction::ProceedToForm => self.session.proceed_to_form(),
            UserAction::SubmitProfile(profile) => self.session.submit_profile(profile),
            UserAction::RequestCapture => self.session.request_capture(),
            UserAction::Navigate(screen) => self.session.navigate(screen),
            UserAction::Restart => self.session.restart(),
            UserAction::Shutdown => Ok(()),
        };

        if let Err(e) = &result {
            self.stats.rejected_actions += 1;
            info!("Action rejected: {}", e);
        }
        result
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
