//! Configuration and CLI argument handling

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::schedule::READY_TICKS;
use crate::state::TimerConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "hiit-timer")]
#[command(about = "A HIIT interval timer with spoken cues and sound effects")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Exercise name; repeat for each exercise, in order
    #[arg(short, long = "exercise")]
    pub exercises: Vec<String>,

    /// File with one exercise per line
    #[arg(long)]
    pub exercises_file: Option<PathBuf>,

    /// JSON timer config (exercises, numSets, activeSecs, restSecs)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of times to repeat the exercise list
    #[arg(short, long)]
    pub sets: Option<u64>,

    /// Seconds of work per exercise
    #[arg(short, long)]
    pub active: Option<u64>,

    /// Seconds of rest after each exercise
    #[arg(short, long)]
    pub rest: Option<u64>,

    /// Length of the "get ready" countdown in seconds
    #[arg(long, default_value_t = READY_TICKS)]
    pub ready: u64,

    /// Milliseconds between ticks
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Directory holding start.wav, tick.wav, beep.wav and alarm.wav
    #[arg(long)]
    pub sound_dir: Option<PathBuf>,

    /// Program used to speak announcements
    #[arg(long, default_value = "espeak")]
    pub speech_command: String,

    /// Log cues instead of playing them
    #[arg(long)]
    pub mute: bool,

    /// Do not keep the display awake
    #[arg(long)]
    pub no_wake_lock: bool,

    /// Run without the HTTP control server
    #[arg(long)]
    pub no_server: bool,

    /// Quit as soon as the workout is done
    #[arg(long)]
    pub exit_on_done: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Build the workout config: defaults, then the JSON file, then flags
    pub fn timer_config(&self) -> Result<TimerConfig, ConfigError> {
        let mut timer = match &self.config {
            Some(path) => TimerConfig::load(path)?,
            None => TimerConfig::default(),
        };

        if let Some(path) = &self.exercises_file {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            timer.exercises = TimerConfig::exercises_from_text(&text);
        }
        if !self.exercises.is_empty() {
            timer.exercises = self.exercises.clone();
        }
        if let Some(sets) = self.sets {
            timer.num_sets = sets;
        }
        if let Some(active) = self.active {
            timer.active_secs = active;
        }
        if let Some(rest) = self.rest {
            timer.rest_secs = rest;
        }

        timer.validate(self.ready)?;
        timer.warn_if_degenerate();
        Ok(timer)
    }
}
