//! Scripted fitting session
//!
//! Runs the whole flow on the real frame loop with a synthetic athlete:
//! tap answers, profile, a stable stance, capture, and analysis (remote if
//! an API key is configured, offline estimate otherwise).
//!
//! Usage: `scripted-session [config.json]`

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::info;
use trifit_analysis::ResilientAnalyzer;
use trifit_core::{Clock, RaceDistance, SystemClock, TrifitResult, UserProfile};
use trifit_runtime::{
    init_tracing, share_camera, LogFormat, Session, SessionConfig, SessionDriver, UserAction,
};
use trifit_test::{FakeCamera, ScriptedLandmarkSource, SkeletonBuilder};
use trifit_voice::{TracingSink, VoiceFeedback};

#[tokio::main]
async fn main() -> TrifitResult<()> {
    init_tracing(LogFormat::Pretty)?;

    println!("=== TRIFIT Scripted Session ===\n");

    // 1. Configuration
    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("1. Loading config from {}", path);
            SessionConfig::load(path)?
        }
        None => {
            println!("1. Using default config");
            SessionConfig::default()
        }
    };

    // 2. Devices: a camera and an athlete standing still, arms down
    println!("2. Preparing scripted camera and athlete");
    let camera = FakeCamera::new();
    let athlete = SkeletonBuilder::well_framed().build();
    let source = ScriptedLandmarkSource::new().repeat(Some(athlete), 2_000);

    // 3. Session and driver
    println!("3. Starting session");
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let voice = VoiceFeedback::new(config.voice.clone(), clock.clone(), Box::new(TracingSink));
    let session = Session::new(&config, clock, voice, share_camera(camera.clone()));
    let analyzer = ResilientAnalyzer::from_config(&config.analysis)?;
    let mut driver = SessionDriver::new(session, source, analyzer, config.frame_interval());

    let (tx, rx) = mpsc::channel(16);
    let script = async move {
        let _ = tx.send(UserAction::StartInterview).await;
        for _ in 0..4 {
            sleep(Duration::from_millis(300)).await;
            let _ = tx.send(UserAction::Tap(true)).await;
        }

        sleep(Duration::from_millis(300)).await;
        let profile = UserProfile {
            name: "Sam".into(),
            height_cm: 181.0,
            weight_kg: 74.0,
            event: RaceDistance::Standard,
            ..UserProfile::default()
        };
        let _ = tx.send(UserAction::SubmitProfile(profile)).await;

        // stable after about 40 frames
        sleep(Duration::from_secs(2)).await;
        let _ = tx.send(UserAction::RequestCapture).await;

        // countdown, then analysis
        sleep(Duration::from_secs(8)).await;
        let _ = tx.send(UserAction::Shutdown).await;
    };

    tokio::join!(driver.run(rx), script);

    // 4. Outcome
    println!("\n4. Outcome");
    let session = driver.session();
    println!("   Screen: {}", session.screen().as_str());
    match session.result() {
        Some(result) => {
            println!("   Size: {}", result.size_recommendation);
            println!("   Suit: {}", result.strategy_suit);
            println!("   Nutrition: {}", result.strategy_nutrition);
            println!("   Tip: {}", result.strategy_tip);
        }
        None => println!("   No result ({:?})", session.validation_error()),
    }

    let log = camera.log();
    info!(
        "Camera started {} times, stopped {} times, {} stills",
        log.starts, log.stops, log.grabs
    );
    info!("Driver stats: {:?}", driver.stats());

    Ok(())
}
