//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controller::SessionSnapshot;
use crate::schedule::PhaseSummary;
use crate::utils::{format_seconds, next_hint, shade};

/// Pre-rendered strings for the timer face
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayHints {
    pub clock: String,
    pub next_hint: String,
    pub shade: u8,
}

impl DisplayHints {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            clock: format_seconds(snapshot.current.secs),
            next_hint: next_hint(snapshot.next.as_ref()),
            shade: shade(snapshot.current.progress),
        }
    }
}

/// Status response with the current, previous and next records
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(flatten)]
    pub session: SessionSnapshot,
    pub display: DisplayHints,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Response for intent endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    /// Create an accepted response
    pub fn accepted(message: String) -> Self {
        Self {
            status: "accepted".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Largest page `/schedule` will return
pub const MAX_SCHEDULE_PAGE: usize = 500;

/// Query string of `/schedule`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQuery {
    /// Start with the phase containing this tick
    pub from: Option<u64>,
    pub limit: Option<usize>,
}

impl ScheduleQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(100).clamp(1, MAX_SCHEDULE_PAGE)
    }
}

/// One page of the phase outline of the running session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub total_secs: u64,
    pub phase_count: u64,
    pub phases: Vec<PhaseSummary>,
    /// Tick to pass as `from` for the following page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_from: Option<u64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
