//! Workout configuration consumed by the schedule engine

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::schedule::{DONE_TICKS, READY_TICKS};

/// Validated workout configuration.
///
/// Immutable once handed to a controller; edits produce a new value and a
/// fresh controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    /// Exercise names in execution order
    pub exercises: Vec<String>,
    /// How many times the full exercise list repeats
    pub num_sets: u64,
    /// Duration of each exercise interval
    pub active_secs: u64,
    /// Duration of the rest following each exercise
    pub rest_secs: u64,
}

const DEFAULT_EXERCISES: &[&str] = &[
    "Lat pulls",
    "Face pulls",
    "Rows",
    "Lateral Raises",
    "Jumping Jacks",
    "Shoulder Shrugs",
    "Overhead Press",
    "Bicep Curls",
    "Lunges",
    "Sumo Squats",
    "Dumbell Swings",
    "Half-kneeling Rows",
    "Chest Fly",
    "Clamshells",
    "Chest Press",
];

impl TimerConfig {
    pub fn new(exercises: Vec<String>, num_sets: u64, active_secs: u64, rest_secs: u64) -> Self {
        Self {
            exercises,
            num_sets,
            active_secs,
            rest_secs,
        }
    }

    /// Parse a JSON document in the stored config shape.
    ///
    /// Negative or fractional timings and non-string exercises are rejected
    /// here so the engine never sees them.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate(READY_TICKS)?;
        config.warn_if_degenerate();
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Split free text into exercise names, one per line.
    ///
    /// Surrounding whitespace is trimmed and blank lines are dropped.
    pub fn exercises_from_text(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Seconds of work and rest, excluding the ready/done framing
    pub fn body_secs(&self) -> u64 {
        (self.exercises.len() as u64)
            .saturating_mul(self.num_sets)
            .saturating_mul(self.active_secs.saturating_add(self.rest_secs))
    }

    /// Reject timings whose session, framed by `ready_ticks` and the done
    /// phase, cannot be indexed by a `u64` tick.
    pub fn validate(&self, ready_ticks: u64) -> Result<(), ConfigError> {
        (self.exercises.len() as u64)
            .checked_mul(self.num_sets)
            .zip(self.active_secs.checked_add(self.rest_secs))
            .and_then(|(blocks, block)| blocks.checked_mul(block))
            .and_then(|body| body.checked_add(ready_ticks))
            .and_then(|ticks| ticks.checked_add(DONE_TICKS))
            .map(|_| ())
            .ok_or_else(|| {
                ConfigError::Malformed(format!(
                    "session of {} x {} sets at {}s active / {}s rest is too long",
                    self.exercises.len(),
                    self.num_sets,
                    self.active_secs,
                    self.rest_secs
                ))
            })
    }

    /// Log configurations that collapse to an immediate "Done"
    pub fn warn_if_degenerate(&self) {
        if self.exercises.is_empty() {
            warn!("Timer config has no exercises; session will go straight to done");
        } else if self.num_sets == 0 {
            warn!("Timer config has zero sets; session will go straight to done");
        } else if self.active_secs == 0 && self.rest_secs == 0 {
            warn!("Timer config has zero-length intervals; session will go straight to done");
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            exercises: DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect(),
            num_sets: 1,
            active_secs: 50,
            rest_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_shape() {
        let config = TimerConfig::from_json_str(
            r#"{"exercises":["ex1","ex2"],"numSets":2,"activeSecs":5,"restSecs":5}"#,
        )
        .unwrap();
        assert_eq!(config, TimerConfig::new(vec!["ex1".into(), "ex2".into()], 2, 5, 5));
        assert_eq!(config.body_secs(), 40);
    }

    #[test]
    fn rejects_negative_and_non_integer_timings() {
        let negative = r#"{"exercises":["a"],"numSets":1,"activeSecs":-5,"restSecs":5}"#;
        let fractional = r#"{"exercises":["a"],"numSets":1,"activeSecs":2.5,"restSecs":5}"#;
        assert!(matches!(
            TimerConfig::from_json_str(negative),
            Err(ConfigError::Malformed(_))
        ));
        assert!(matches!(
            TimerConfig::from_json_str(fractional),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_string_exercises() {
        let json = r#"{"exercises":["a", 3],"numSets":1,"activeSecs":5,"restSecs":5}"#;
        assert!(matches!(
            TimerConfig::from_json_str(json),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_sessions_longer_than_a_tick_can_count() {
        let json = r#"{"exercises":["a"],"numSets":1,"activeSecs":18446744073709551615,"restSecs":0}"#;
        assert!(matches!(
            TimerConfig::from_json_str(json),
            Err(ConfigError::Malformed(_))
        ));

        let config = TimerConfig::new(vec!["a".into()], 1, u64::MAX, 5);
        assert!(matches!(config.validate(READY_TICKS), Err(ConfigError::Malformed(_))));
        let config = TimerConfig::new(vec!["a".into(), "b".into()], u64::MAX / 2 + 1, 1, 0);
        assert!(config.validate(0).is_err());
        let config = TimerConfig::new(vec!["a".into()], 1, u64::MAX - 5, 0);
        assert!(config.validate(3).is_ok());
        assert!(config.validate(4).is_err());
    }

    #[test]
    fn exercises_from_text_keeps_order_and_drops_blanks() {
        let text = "Rows\n\n  Lunges \nChest Fly\n";
        assert_eq!(
            TimerConfig::exercises_from_text(text),
            vec!["Rows", "Lunges", "Chest Fly"]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TimerConfig::load(Path::new("/nonexistent/hiit.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
