//! External collaborators: sound, speech and the screen wake-lock
//!
//! The controller only decides *when* and *what* to play; these services
//! decide *how*. Every call is fire-and-forget.

pub mod audio;
pub mod system;
pub mod wake_lock;

use crate::state::Cue;

// Re-export main types
pub use audio::{CommandAudio, TerminalAudio};
pub use system::command_available;
pub use wake_lock::{InhibitWakeLock, NoopWakeLock};

/// Sound effect and speech output
pub trait AudioOutput: Send + Sync {
    /// Start playing a cue without waiting for it to finish
    fn play(&self, cue: Cue);

    /// Start speaking `text` without waiting for it to finish
    fn speak(&self, text: &str);
}

/// A binary held/not-held capability that keeps the display awake
pub trait WakeLock: Send + Sync {
    fn request(&self);

    fn release(&self);

    fn is_supported(&self) -> bool {
        true
    }
}
