//! Session background task
//!
//! Drives a `TimerController` at a fixed cadence and serializes timer
//! firings with user intents, so the controller has a single writer.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    controller::{FireOutcome, TimerController, TimerPhase},
    state::{AppState, Intent},
};

/// How a session task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Exited,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Time between firings
    pub tick_period: Duration,
    /// Return as soon as the session reaches done instead of waiting for exit
    pub exit_on_done: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            exit_on_done: false,
        }
    }
}

/// Background task that runs one workout session to completion or exit
pub async fn session_task(
    mut controller: TimerController,
    state: Arc<AppState>,
    mut intents: mpsc::Receiver<Intent>,
    options: SessionOptions,
) -> SessionOutcome {
    info!("Starting session task");

    controller.attach();
    state.publish(controller.snapshot());

    let period = options.tick_period;
    let mut ticker: Option<Interval> = None;

    loop {
        // Keep the recurring timer in step with the controller
        if controller.is_ticking() {
            if ticker.is_none() {
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker = Some(interval);
            }
        } else if ticker.take().is_some() {
            debug!("Ticker cancelled");
        }

        if controller.phase() == TimerPhase::Done && options.exit_on_done {
            controller.detach();
            return SessionOutcome::Completed;
        }

        tokio::select! {
            _ = next_tick(&mut ticker) => {
                if controller.fire() == FireOutcome::Stale {
                    debug!("Stale firing ignored");
                }
                state.publish(controller.snapshot());
            }

            intent = intents.recv() => {
                match intent {
                    Some(Intent::TogglePause) => {
                        let phase = controller.toggle_pause();
                        debug!("Toggle intent handled, now {:?}", phase);
                        state.publish(controller.snapshot());
                    }
                    Some(Intent::Exit) => {
                        controller.exit();
                        state.publish(controller.snapshot());
                        return SessionOutcome::Exited;
                    }
                    None => {
                        info!("All intent senders dropped, ending session");
                        controller.detach();
                        return SessionOutcome::Exited;
                    }
                }
            }
        }
    }
}

/// Wait for the next firing, or forever when no ticker is armed
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
