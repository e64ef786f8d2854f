//! HIIT Timer - run one interval workout from the command line
//!
//! This is the main entry point for the hiit-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use hiit_timer::{
    config::Config,
    controller::TimerController,
    schedule::Schedule,
    services::{
        command_available, AudioOutput, CommandAudio, InhibitWakeLock, NoopWakeLock,
        TerminalAudio, WakeLock,
    },
    state::AppState,
    api::create_router,
    tasks::{session_task, spawn_hotkey_listener, SessionOptions, SessionOutcome},
    utils::{format_seconds, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hiit_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting hiit-timer v{}", env!("CARGO_PKG_VERSION"));

    let timer_config = config.timer_config()?;
    info!(
        "Workout: {} exercises x {} sets, {}s active / {}s rest",
        timer_config.exercises.len(),
        timer_config.num_sets,
        timer_config.active_secs,
        timer_config.rest_secs
    );

    let schedule = Schedule::with_ready_ticks(timer_config, config.ready);
    info!("Session length: {}", format_seconds(schedule.total_secs()));

    let audio = build_audio(&config).await;
    let wake_lock = build_wake_lock(&config).await;
    let controller = TimerController::new(schedule.clone(), audio, wake_lock);

    let (state, intents) = AppState::new(
        config.port,
        config.host.clone(),
        controller.snapshot(),
        &schedule,
    );
    let state = Arc::new(state);

    // Start the session in the background
    let options = SessionOptions {
        tick_period: config.tick_period(),
        exit_on_done: config.exit_on_done,
    };
    let session = tokio::spawn(session_task(controller, Arc::clone(&state), intents, options));

    // Keyboard control
    if let Err(e) = spawn_hotkey_listener(Arc::clone(&state)) {
        tracing::warn!("Failed to start hotkey listener: {}", e);
    }

    let server = async {
        if config.no_server {
            return std::future::pending::<anyhow::Result<()>>().await;
        }
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await?;
        info!("Control server running on http://{}", addr);
        info!("Endpoints:");
        info!("  POST /toggle   - Pause or resume");
        info!("  POST /exit     - Leave the timer");
        info!("  GET  /status   - Current, previous and next phase");
        info!("  GET  /schedule - Phase outline");
        info!("  GET  /health   - Health check");
        axum::serve(listener, create_router(Arc::clone(&state))).await?;
        Ok::<(), anyhow::Error>(())
    };

    tokio::select! {
        result = session => {
            match result? {
                SessionOutcome::Completed => info!("Workout complete"),
                SessionOutcome::Exited => info!("Timer exited"),
            }
        }
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

async fn build_audio(config: &Config) -> Arc<dyn AudioOutput> {
    match &config.sound_dir {
        Some(dir) if !config.mute && command_available("paplay").await => {
            info!("Playing cues from {}", dir.display());
            Arc::new(CommandAudio::new(dir.clone(), config.speech_command.clone()))
        }
        _ => Arc::new(TerminalAudio::new(!config.mute)),
    }
}

async fn build_wake_lock(config: &Config) -> Arc<dyn WakeLock> {
    if !config.no_wake_lock && command_available("systemd-inhibit").await {
        Arc::new(InhibitWakeLock::new())
    } else {
        Arc::new(NoopWakeLock::new())
    }
}
