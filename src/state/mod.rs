//! State management module
//!
//! Data types shared between the schedule engine, the controller and the
//! presentation layer.

pub mod app_state;
pub mod tick;
pub mod timer_config;

// Re-export main types
pub use app_state::{AppState, Intent};
pub use tick::{Color, Cue, PhaseKey, Sfx, TickRecord};
pub use timer_config::TimerConfig;
