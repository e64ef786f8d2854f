//! Sound effect and speech playback

use std::io::Write;
use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, info, warn};

use super::AudioOutput;
use crate::state::Cue;

/// Plays cues and speech by spawning external programs.
///
/// Cue files are looked up as `<sound_dir>/<cue>.wav`.
#[derive(Debug, Clone)]
pub struct CommandAudio {
    pub sound_dir: PathBuf,
    pub player: String,
    pub speech_command: String,
}

impl CommandAudio {
    pub fn new(sound_dir: PathBuf, speech_command: String) -> Self {
        Self {
            sound_dir,
            player: "paplay".to_string(),
            speech_command,
        }
    }

    pub fn cue_path(&self, cue: Cue) -> PathBuf {
        self.sound_dir.join(format!("{}.wav", cue.name()))
    }
}

impl AudioOutput for CommandAudio {
    fn play(&self, cue: Cue) {
        let path = self.cue_path(cue);
        let mut command = Command::new(&self.player);
        command.arg(path);
        spawn_detached(command, format!("{} cue", cue.name()));
    }

    fn speak(&self, text: &str) {
        let mut command = Command::new(&self.speech_command);
        command.arg(text);
        spawn_detached(command, format!("speech '{}'", text));
    }
}

/// Run a child process in the background, logging failures only
fn spawn_detached(mut command: Command, what: String) {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        warn!("No async runtime available, dropping {}", what);
        return;
    };
    handle.spawn(async move {
        match command.output().await {
            Ok(output) if output.status.success() => debug!("Finished {}", what),
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("{} failed: {}", what, stderr.trim());
            }
            Err(e) => warn!("Failed to execute {}: {}", what, e),
        }
    });
}

/// Fallback output: logs cues and rings the terminal bell for beeps and alarms
#[derive(Debug, Clone, Default)]
pub struct TerminalAudio {
    pub bell: bool,
}

impl TerminalAudio {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl AudioOutput for TerminalAudio {
    fn play(&self, cue: Cue) {
        debug!("cue: {}", cue.name());
        if self.bell && matches!(cue, Cue::Beep | Cue::Alarm) {
            let mut stdout = std::io::stdout();
            if stdout.write_all(b"\x07").and_then(|_| stdout.flush()).is_err() {
                debug!("Terminal bell unavailable");
            }
        }
    }

    fn speak(&self, text: &str) {
        info!("\"{}\"", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_files_live_in_sound_dir() {
        let audio = CommandAudio::new(PathBuf::from("/usr/share/hiit"), "espeak".to_string());
        assert_eq!(audio.cue_path(Cue::Alarm), PathBuf::from("/usr/share/hiit/alarm.wav"));
        assert_eq!(audio.cue_path(Cue::Start), PathBuf::from("/usr/share/hiit/start.wav"));
    }

    #[test]
    fn playing_without_runtime_is_harmless() {
        let audio = CommandAudio::new(PathBuf::from("/tmp"), "espeak".to_string());
        audio.play(Cue::Tick);
        audio.speak("Rest");
    }
}
