//! Shared state between the session task and the presentation layer

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::controller::SessionSnapshot;
use crate::error::ApiError;
use crate::schedule::Schedule;

/// User intents forwarded to the session task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    TogglePause,
    Exit,
}

impl Intent {
    pub fn action_name(self) -> &'static str {
        match self {
            Intent::TogglePause => "toggle",
            Intent::Exit => "exit",
        }
    }
}

/// Application state handed to the HTTP handlers and the hotkey task.
///
/// The session task is the only writer of the controller; everyone else
/// reads published snapshots and sends intents.
#[derive(Debug)]
pub struct AppState {
    /// Channel for snapshot updates
    pub snapshot_tx: watch::Sender<SessionSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<SessionSnapshot>,
    /// Channel for user intents
    pub intent_tx: mpsc::Sender<Intent>,
    /// Schedule of the running session, for outline queries
    pub schedule: Schedule,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create the shared state and the receiving end of the intent channel
    pub fn new(
        port: u16,
        host: String,
        initial: SessionSnapshot,
        schedule: &Schedule,
    ) -> (Self, mpsc::Receiver<Intent>) {
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (intent_tx, intent_rx) = mpsc::channel(32);

        let state = Self {
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            intent_tx,
            schedule: schedule.clone(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        };
        (state, intent_rx)
    }

    /// Publish a new snapshot to all readers
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.snapshot_tx.send_replace(snapshot);
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Forward an intent to the session task and record it as the last action
    pub async fn send_intent(&self, intent: Intent) -> Result<(), ApiError> {
        self.intent_tx
            .send(intent)
            .await
            .map_err(|_| ApiError::SessionClosed)?;
        self.record_action(intent);
        Ok(())
    }

    /// Blocking variant of `send_intent` for threads outside the runtime
    pub fn blocking_send_intent(&self, intent: Intent) -> Result<(), ApiError> {
        self.intent_tx
            .blocking_send(intent)
            .map_err(|_| ApiError::SessionClosed)?;
        self.record_action(intent);
        Ok(())
    }

    fn record_action(&self, intent: Intent) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(intent.action_name().to_string());
        }
        match self.last_action_time.lock() {
            Ok(mut last_time) => *last_time = Some(Utc::now()),
            Err(e) => warn!("Failed to record last action time: {}", e),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
