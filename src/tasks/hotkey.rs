//! Keyboard control from stdin
//!
//! Runs on a plain thread: a blocking stdin read inside the runtime would
//! keep the process alive after shutdown.

use std::{
    io::BufRead,
    sync::Arc,
    thread::{self, JoinHandle},
};
use tracing::{debug, info, warn};

use crate::state::{AppState, Intent};

/// Map a line typed on stdin to an intent.
///
/// An empty line (Enter, or space then Enter) toggles pause like the
/// spacebar does; `q`/`quit`/`exit` leaves the timer.
pub fn parse_hotkey(line: &str) -> Option<Intent> {
    match line.trim().to_lowercase().as_str() {
        "" | "p" | "pause" | "resume" => Some(Intent::TogglePause),
        "q" | "quit" | "exit" => Some(Intent::Exit),
        _ => None,
    }
}

/// Start a thread that turns stdin lines into intents
pub fn spawn_hotkey_listener(state: Arc<AppState>) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("hotkeys".to_string())
        .spawn(move || listen(state, std::io::stdin().lock()))
}

fn listen(state: Arc<AppState>, input: impl BufRead) {
    info!("Press Enter to pause/resume the timer, q to exit");

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                return;
            }
        };
        let Some(intent) = parse_hotkey(&line) else {
            debug!("Ignoring unknown hotkey input: {:?}", line);
            continue;
        };
        if let Err(e) = state.blocking_send_intent(intent) {
            debug!("Hotkeys disabled: {}", e);
            return;
        }
    }
    debug!("stdin closed, hotkeys disabled");
}
