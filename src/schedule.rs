//! Tick schedule engine
//!
//! Maps a tick index to the display/audio record for that instant. The
//! schedule is never materialized: every lookup is computed from the config
//! and the index alone, so replaying from tick 0 always yields the same
//! records.
//!
//! ## Layout
//!
//! ```text
//! ready (READY_TICKS) | for set, for exercise: active (activeSecs), rest (restSecs) | done (2)
//! ```
//!
//! Indices past the end saturate at the final `done` record.

use crate::error::ScheduleError;
use crate::state::{Color, PhaseKey, Sfx, TickRecord, TimerConfig};

/// Default number of ticks in the ready countdown
pub const READY_TICKS: u64 = 3;

/// Ticks in the done phase: the alarm tick and the terminal tick
pub const DONE_TICKS: u64 = 2;

const READY_LABEL: &str = "Get Ready...";
const READY_SPEECH: &str = "Get ready";
const REST_LABEL: &str = "Rest";
const DONE_LABEL: &str = "Done!";
const DONE_SPEECH: &str = "Done";

/// Stateless view over a `TimerConfig` that answers tick lookups
#[derive(Debug, Clone)]
pub struct Schedule {
    config: TimerConfig,
    ready_ticks: u64,
}

/// Position of a tick inside its phase block
#[derive(Debug, Clone, Copy)]
struct Slot {
    key: PhaseKey,
    start: u64,
    len: u64,
    offset: u64,
}

/// One entry of the phase outline
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSummary {
    pub label_key: PhaseKey,
    pub label: String,
    pub start_tick: u64,
    pub ticks: u64,
}

impl Schedule {
    pub fn new(config: TimerConfig) -> Self {
        Self::with_ready_ticks(config, READY_TICKS)
    }

    pub fn with_ready_ticks(config: TimerConfig, ready_ticks: u64) -> Self {
        Self {
            config,
            ready_ticks,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn ready_ticks(&self) -> u64 {
        self.ready_ticks
    }

    /// Total ticks including both done ticks
    pub fn len(&self) -> u64 {
        self.ready_ticks
            .saturating_add(self.body_ticks())
            .saturating_add(DONE_TICKS)
    }

    /// A schedule always holds at least the done phase
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Seconds from the first ready tick to the first done tick
    pub fn total_secs(&self) -> u64 {
        self.ready_ticks.saturating_add(self.body_ticks())
    }

    /// Look up the record for tick `n`.
    ///
    /// Negative indices are a caller bug and fail with `InvalidTick`.
    pub fn tick_at(&self, n: i64) -> Result<TickRecord, ScheduleError> {
        Ok(self.record(Self::index(n)?))
    }

    /// Infallible lookup for indices already known to be valid
    pub fn record(&self, n: u64) -> TickRecord {
        self.build(self.locate(n))
    }

    /// The nearest earlier tick belonging to a different phase
    pub fn previous_phase(&self, n: i64) -> Result<Option<TickRecord>, ScheduleError> {
        Ok(self.previous_record(Self::index(n)?))
    }

    /// The first tick of the following phase, or `None` once in done
    pub fn next_phase(&self, n: i64) -> Result<Option<TickRecord>, ScheduleError> {
        Ok(self.next_record(Self::index(n)?))
    }

    pub fn previous_record(&self, n: u64) -> Option<TickRecord> {
        let slot = self.locate(n);
        if slot.start == 0 {
            return None;
        }
        Some(self.record(slot.start - 1))
    }

    pub fn next_record(&self, n: u64) -> Option<TickRecord> {
        let slot = self.locate(n);
        if slot.key == PhaseKey::Done {
            return None;
        }
        Some(self.record(slot.start.saturating_add(slot.len)))
    }

    /// Number of phases, ready and done included, without walking them
    pub fn phase_count(&self) -> u64 {
        let per_exercise = u64::from(self.config.active_secs > 0) + u64::from(self.config.rest_secs > 0);
        let body = (self.config.exercises.len() as u64)
            .saturating_mul(self.config.num_sets)
            .saturating_mul(per_exercise);
        u64::from(self.ready_ticks > 0)
            .saturating_add(body)
            .saturating_add(1)
    }

    /// Iterate over every phase in order, ending with done
    pub fn phases(&self) -> Phases<'_> {
        self.phases_from(0)
    }

    /// Iterate over the phases starting with the one that contains tick `n`
    pub fn phases_from(&self, n: u64) -> Phases<'_> {
        Phases {
            schedule: self,
            next_start: Some(self.locate(n).start),
        }
    }

    fn index(n: i64) -> Result<u64, ScheduleError> {
        u64::try_from(n).map_err(|_| ScheduleError::InvalidTick(n))
    }

    fn block_ticks(&self) -> u64 {
        self.config.active_secs.saturating_add(self.config.rest_secs)
    }

    fn body_ticks(&self) -> u64 {
        self.config.body_secs()
    }

    fn locate(&self, n: u64) -> Slot {
        if n < self.ready_ticks {
            return Slot {
                key: PhaseKey::Ready,
                start: 0,
                len: self.ready_ticks,
                offset: n,
            };
        }

        let body_start = self.ready_ticks;
        let body_offset = n - body_start;
        if body_offset < self.body_ticks() {
            // body_ticks > 0 implies a non-empty block and exercise list
            let block = self.block_ticks();
            let index = body_offset / block;
            let within = body_offset % block;
            let exercise_count = self.config.exercises.len() as u64;
            let set = index / exercise_count;
            let exercise = index % exercise_count;
            let base = body_start + index * block;

            return if within < self.config.active_secs {
                Slot {
                    key: PhaseKey::Active { set, exercise },
                    start: base,
                    len: self.config.active_secs,
                    offset: within,
                }
            } else {
                Slot {
                    key: PhaseKey::Rest { set, exercise },
                    start: base + self.config.active_secs,
                    len: self.config.rest_secs,
                    offset: within - self.config.active_secs,
                }
            };
        }

        let done_start = body_start + self.body_ticks();
        Slot {
            key: PhaseKey::Done,
            start: done_start,
            len: DONE_TICKS,
            offset: (n - done_start).min(DONE_TICKS - 1),
        }
    }

    fn build(&self, slot: Slot) -> TickRecord {
        let i = slot.offset;
        let first = i == 0;
        match slot.key {
            PhaseKey::Ready => TickRecord {
                label: READY_LABEL.to_string(),
                label_key: slot.key,
                secs: slot.len - i,
                progress: progress(i, slot.len),
                color: Color::Orange,
                tts: first.then(|| READY_SPEECH.to_string()),
                sfx: Some(Sfx::Beep),
                done: false,
            },
            PhaseKey::Active { exercise, .. } => {
                let label = self.config.exercises[exercise as usize].clone();
                TickRecord {
                    tts: first.then(|| label.clone()),
                    label,
                    label_key: slot.key,
                    secs: slot.len - i,
                    progress: progress(i, slot.len),
                    color: Color::Red,
                    sfx: Some(countdown_sfx(slot.len, i)),
                    done: false,
                }
            }
            PhaseKey::Rest { .. } => TickRecord {
                label: REST_LABEL.to_string(),
                label_key: slot.key,
                secs: slot.len - i,
                progress: progress(i, slot.len),
                color: Color::Green,
                tts: first.then(|| REST_LABEL.to_string()),
                sfx: Some(countdown_sfx(slot.len, i)),
                done: false,
            },
            PhaseKey::Done => TickRecord {
                label: DONE_LABEL.to_string(),
                label_key: slot.key,
                secs: 0,
                progress: 1.0,
                color: Color::Black,
                tts: first.then(|| DONE_SPEECH.to_string()),
                sfx: first.then_some(Sfx::Alarm),
                done: !first,
            },
        }
    }
}

/// Start cue on the first tick, beeps for the last three seconds, ticks otherwise
fn countdown_sfx(len: u64, i: u64) -> Sfx {
    if i == 0 {
        Sfx::Start
    } else if len - i <= 3 {
        Sfx::Beep
    } else {
        Sfx::Tick
    }
}

fn progress(i: u64, len: u64) -> f64 {
    i as f64 / len as f64
}

/// Iterator over the phase outline of a schedule
pub struct Phases<'a> {
    schedule: &'a Schedule,
    next_start: Option<u64>,
}

impl Iterator for Phases<'_> {
    type Item = PhaseSummary;

    fn next(&mut self) -> Option<PhaseSummary> {
        let start = self.next_start?;
        let slot = self.schedule.locate(start);
        self.next_start = match slot.key {
            PhaseKey::Done => None,
            _ => slot.start.checked_add(slot.len).filter(|&end| end > slot.start),
        };
        Some(PhaseSummary {
            label_key: slot.key,
            label: self.schedule.build(slot).label,
            start_tick: slot.start,
            ticks: slot.len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(exercises: &[&str], sets: u64, active: u64, rest: u64) -> Schedule {
        Schedule::new(TimerConfig::new(
            exercises.iter().map(|s| s.to_string()).collect(),
            sets,
            active,
            rest,
        ))
    }

    #[test]
    fn negative_index_is_invalid() {
        let s = schedule(&["ex1"], 1, 5, 5);
        assert_eq!(s.tick_at(-1), Err(ScheduleError::InvalidTick(-1)));
        assert_eq!(s.previous_phase(-3), Err(ScheduleError::InvalidTick(-3)));
        assert_eq!(s.next_phase(-3), Err(ScheduleError::InvalidTick(-3)));
    }

    #[test]
    fn empty_exercises_go_from_ready_to_done() {
        let s = schedule(&[], 3, 5, 5);
        assert_eq!(s.len(), READY_TICKS + 2);
        assert_eq!(s.record(2).label_key, PhaseKey::Ready);
        let boundary = s.record(3);
        assert_eq!(boundary.label_key, PhaseKey::Done);
        assert!(!boundary.done);
        assert!(s.record(4).done);
    }

    #[test]
    fn zero_sets_collapse_the_body() {
        let s = schedule(&["ex1", "ex2"], 0, 5, 5);
        let keys: Vec<_> = s.phases().map(|p| p.label_key).collect();
        assert_eq!(keys, vec![PhaseKey::Ready, PhaseKey::Done]);
    }

    #[test]
    fn zero_rest_omits_rest_blocks() {
        let s = schedule(&["ex1", "ex2"], 1, 4, 0);
        let keys: Vec<_> = s.phases().map(|p| p.label_key.to_string()).collect();
        assert_eq!(keys, vec!["ready", "active.0.0", "active.0.1", "done"]);
        let next = s.next_phase(3).unwrap().unwrap();
        assert_eq!(next.label, "ex2");
        assert_eq!(next.tts.as_deref(), Some("ex2"));
    }

    #[test]
    fn zero_active_omits_active_blocks() {
        let s = schedule(&["ex1"], 2, 0, 2);
        let keys: Vec<_> = s.phases().map(|p| p.label_key.to_string()).collect();
        assert_eq!(keys, vec!["ready", "rest.0.0", "rest.1.0", "done"]);
    }

    #[test]
    fn all_zero_durations_go_straight_to_done() {
        let s = schedule(&["ex1"], 2, 0, 0);
        assert_eq!(s.record(READY_TICKS).label_key, PhaseKey::Done);
    }

    #[test]
    fn zero_ready_ticks_starts_in_body() {
        let s = Schedule::with_ready_ticks(TimerConfig::new(vec!["ex1".into()], 1, 2, 2), 0);
        let first = s.record(0);
        assert_eq!(first.label_key, PhaseKey::Active { set: 0, exercise: 0 });
        assert_eq!(s.previous_phase(0).unwrap(), None);
    }

    #[test]
    fn richer_ready_countdown() {
        let s = Schedule::with_ready_ticks(TimerConfig::new(vec!["ex1".into()], 1, 5, 5), 5);
        let secs: Vec<_> = (0..5).map(|n| s.record(n).secs).collect();
        assert_eq!(secs, vec![5, 4, 3, 2, 1]);
        assert_eq!(s.record(0).progress, 0.0);
        assert_eq!(s.record(4).progress, 0.8);
        assert_eq!(s.record(5).label, "ex1");
    }

    #[test]
    fn short_block_starts_with_start_then_beeps() {
        let s = schedule(&["ex1"], 1, 2, 0);
        assert_eq!(s.record(3).sfx, Some(Sfx::Start));
        assert_eq!(s.record(4).sfx, Some(Sfx::Beep));
    }

    #[test]
    fn past_the_end_saturates() {
        let s = schedule(&["ex1"], 1, 5, 5);
        let last = s.record(s.len() - 1);
        assert!(last.done);
        assert_eq!(s.record(s.len() + 1_000_000), last);
        assert_eq!(s.tick_at(i64::MAX).unwrap(), last);
    }

    #[test]
    fn phase_outline_covers_the_whole_schedule() {
        let s = schedule(&["ex1", "ex2"], 2, 5, 5);
        let phases: Vec<_> = s.phases().collect();
        assert_eq!(phases.len(), 10);
        assert_eq!(phases[1].start_tick, 3);
        assert_eq!(phases[1].label, "ex1");
        assert_eq!(phases.last().unwrap().start_tick, 43);
        let counted: u64 = phases.iter().map(|p| p.ticks).sum();
        assert_eq!(counted, s.len());
        assert_eq!(s.total_secs(), 43);
        assert_eq!(s.phase_count(), 10);
    }

    #[test]
    fn phase_count_skips_empty_blocks() {
        assert_eq!(schedule(&["ex1", "ex2"], 1, 4, 0).phase_count(), 4);
        assert_eq!(schedule(&["ex1"], 2, 0, 2).phase_count(), 4);
        assert_eq!(schedule(&["ex1"], 3, 0, 0).phase_count(), 2);
        assert_eq!(schedule(&[], 3, 5, 5).phase_count(), 2);
        let no_ready = Schedule::with_ready_ticks(TimerConfig::new(vec!["ex1".into()], 1, 2, 2), 0);
        assert_eq!(no_ready.phase_count(), no_ready.phases().count() as u64);
    }

    #[test]
    fn long_sessions_are_outlined_lazily() {
        let s = Schedule::new(TimerConfig::new(
            TimerConfig::default().exercises,
            1_000_000,
            50,
            10,
        ));
        assert_eq!(s.phase_count(), 30_000_002);

        let late = s.len() - 200;
        let tail: Vec<_> = s.phases_from(late).collect();
        assert_eq!(tail.first().map(|p| p.start_tick), Some(s.locate(late).start));
        assert_eq!(tail.last().map(|p| p.label_key), Some(PhaseKey::Done));
        assert!(tail.len() < 10);
    }

    #[test]
    fn phases_from_mid_phase_starts_at_its_beginning() {
        let s = schedule(&["ex1", "ex2"], 2, 5, 5);
        let first = s.phases_from(15).next().unwrap();
        assert_eq!(first.label_key, PhaseKey::Active { set: 0, exercise: 1 });
        assert_eq!(first.start_tick, 13);
    }

    #[test]
    fn huge_intervals_do_not_overflow() {
        let s = schedule(&["ex1"], 1, u64::MAX, 0);
        assert!(s.next_phase(3).is_ok());
        assert!(s.previous_phase(i64::MAX).is_ok());

        let s = schedule(&["ex1"], 1, u64::MAX, 5);
        assert_eq!(s.phases().take(5).count(), 2);
        assert!(s.next_phase(3).unwrap().is_some());
    }
}
