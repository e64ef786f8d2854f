//! HIIT Timer - an interval timer for high-intensity interval training
//!
//! A pure tick schedule maps `(config, tick)` to what should be shown and
//! heard; a controller advances through it once per second and drives
//! speech, sound effects and the screen wake-lock.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod schedule;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controller::{FireOutcome, Navigation, SessionSnapshot, TimerController, TimerPhase};
pub use error::{ApiError, ConfigError, ScheduleError};
pub use schedule::{Schedule, READY_TICKS};
pub use state::{AppState, Intent, TickRecord, TimerConfig};
pub use utils::signals::shutdown_signal;
