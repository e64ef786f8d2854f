//! Tick record types produced by the schedule engine

use std::fmt;

use serde::{Serialize, Serializer};

/// Stable, machine-comparable identifier of a phase.
///
/// Two ticks belong to the same phase iff their keys are equal. The string
/// form (`ready`, `active.<set>.<exercise>`, `rest.<set>.<exercise>`, `done`)
/// is what goes over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKey {
    Ready,
    Active { set: u64, exercise: u64 },
    Rest { set: u64, exercise: u64 },
    Done,
}

impl fmt::Display for PhaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKey::Ready => write!(f, "ready"),
            PhaseKey::Active { set, exercise } => write!(f, "active.{}.{}", set, exercise),
            PhaseKey::Rest { set, exercise } => write!(f, "rest.{}.{}", set, exercise),
            PhaseKey::Done => write!(f, "done"),
        }
    }
}

impl Serialize for PhaseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Display color of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Orange,
    Red,
    Green,
    Black,
}

/// Sound effect attached to a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sfx {
    Start,
    Tick,
    Beep,
    Alarm,
}

/// A single playable sound, as understood by the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Start,
    Tick,
    Beep,
    Alarm,
}

impl Sfx {
    /// Cues to play for this effect, in order.
    ///
    /// Start and beep are layered over the tick sound; the alarm plays alone.
    pub fn cues(self) -> &'static [Cue] {
        match self {
            Sfx::Start => &[Cue::Start, Cue::Tick],
            Sfx::Tick => &[Cue::Tick],
            Sfx::Beep => &[Cue::Beep, Cue::Tick],
            Sfx::Alarm => &[Cue::Alarm],
        }
    }
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Start, Cue::Tick, Cue::Beep, Cue::Alarm];

    /// File stem and log name of the cue
    pub fn name(self) -> &'static str {
        match self {
            Cue::Start => "start",
            Cue::Tick => "tick",
            Cue::Beep => "beep",
            Cue::Alarm => "alarm",
        }
    }
}

/// Display and audio record for one tick of the schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickRecord {
    pub label: String,
    pub label_key: PhaseKey,
    /// Seconds remaining in the phase; 0 only in the done phase
    pub secs: u64,
    /// Fraction of the phase elapsed
    pub progress: f64,
    pub color: Color,
    /// Phrase to speak; only on the first tick of a phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfx: Option<Sfx>,
    pub done: bool,
}

impl TickRecord {
    /// Whether `other` belongs to the same phase as this record
    pub fn same_phase(&self, other: &TickRecord) -> bool {
        self.label_key == other.label_key
    }
}
