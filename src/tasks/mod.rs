//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod hotkey;
pub mod session;

// Re-export main functions
pub use hotkey::spawn_hotkey_listener;
pub use session::{session_task, SessionOptions, SessionOutcome};
