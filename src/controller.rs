//! Timer controller
//!
//! Owns the tick counter and the `Running | Paused | Done` state machine,
//! and fires speech, sound and wake-lock side effects exactly once per new
//! tick. The controller never sleeps: the session task calls `fire()` once
//! per second while `is_ticking()` is true.
//!
//! ## State Transitions
//!
//! ```text
//! Running <-> Paused
//! Running  -> Done (terminal)
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::schedule::Schedule;
use crate::services::{AudioOutput, WakeLock};
use crate::state::TickRecord;
use crate::utils::{format_seconds, next_hint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Running,
    Paused,
    Done,
}

impl TimerPhase {
    /// Label of the play/pause button
    pub fn button_label(self) -> &'static str {
        match self {
            TimerPhase::Running => "Pause",
            TimerPhase::Paused => "Resume",
            TimerPhase::Done => "Done",
        }
    }

    pub fn button_enabled(self) -> bool {
        self != TimerPhase::Done
    }
}

/// What a single call to `fire()` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// The gated first firing announced tick 0 without advancing
    Announced,
    /// Advanced to the given tick
    Advanced(u64),
    /// Advanced to the given tick and reached the end of the session
    Completed(u64),
    /// Fired while not running; nothing happened
    Stale,
}

/// Where the presentation layer should go after `exit()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    ToConfig,
}

/// Read-only view of the controller for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: TimerPhase,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub tick_count: u64,
    pub current: TickRecord,
    pub previous: Option<TickRecord>,
    pub next: Option<TickRecord>,
}

pub struct TimerController {
    schedule: Schedule,
    phase: TimerPhase,
    tick_count: u64,
    first_tick: bool,
    ticking: bool,
    attached: bool,
    exited: bool,
    wake_lock_held: bool,
    audio: Arc<dyn AudioOutput>,
    wake_lock: Arc<dyn WakeLock>,
}

impl TimerController {
    pub fn new(
        schedule: Schedule,
        audio: Arc<dyn AudioOutput>,
        wake_lock: Arc<dyn WakeLock>,
    ) -> Self {
        Self {
            schedule,
            phase: TimerPhase::Running,
            tick_count: 0,
            first_tick: true,
            ticking: false,
            attached: false,
            exited: false,
            wake_lock_held: false,
            audio,
            wake_lock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the recurring one-second timer should be armed
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether `exit()` has been called; every later command is ignored
    pub fn is_exited(&self) -> bool {
        self.exited
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn current(&self) -> TickRecord {
        self.schedule.record(self.tick_count)
    }

    pub fn previous(&self) -> Option<TickRecord> {
        self.schedule.previous_record(self.tick_count)
    }

    pub fn next(&self) -> Option<TickRecord> {
        self.schedule.next_record(self.tick_count)
    }

    pub fn button_label(&self) -> &'static str {
        self.phase.button_label()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            button_label: self.phase.button_label(),
            button_enabled: self.phase.button_enabled(),
            tick_count: self.tick_count,
            current: self.current(),
            previous: self.previous(),
            next: self.next(),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Enter Running for the first time.
    ///
    /// Requests the wake-lock, arms the ticker and announces tick 0 right
    /// away. Calling it again, or after `exit()`, is a no-op.
    pub fn attach(&mut self) -> Option<FireOutcome> {
        if self.attached || self.exited {
            return None;
        }
        self.attached = true;
        info!(
            "Starting session: {} phases, {}",
            self.schedule.phase_count(),
            format_seconds(self.schedule.total_secs())
        );
        self.acquire_wake_lock();
        self.ticking = self.phase == TimerPhase::Running;
        Some(self.fire())
    }

    /// Cancel the ticker and release the wake-lock. Safe to call repeatedly.
    pub fn detach(&mut self) {
        self.ticking = false;
        self.release_wake_lock();
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One firing of the recurring timer.
    ///
    /// Stale until `attach()` has run, so the first-tick announcement and the
    /// wake-lock request always happen together.
    pub fn fire(&mut self) -> FireOutcome {
        if !self.attached || self.exited {
            debug!("Ignoring firing outside an attached session");
            return FireOutcome::Stale;
        }
        if self.first_tick {
            self.first_tick = false;
            self.dispatch(self.tick_count);
            return FireOutcome::Announced;
        }
        if self.phase != TimerPhase::Running {
            // Only reachable through a firing that raced a pause or the end
            // of the session. Make sure the ticker is off and do nothing else.
            debug!("Ignoring stale firing in {:?}", self.phase);
            self.ticking = false;
            return FireOutcome::Stale;
        }

        let next = self.tick_count + 1;
        let record = self.dispatch(next);
        self.tick_count = next;
        if record.done {
            self.ticking = false;
            self.release_wake_lock();
            self.phase = TimerPhase::Done;
            info!("Session complete after {} ticks", next);
            FireOutcome::Completed(next)
        } else {
            FireOutcome::Advanced(next)
        }
    }

    /// Pause when running, resume when paused, ignore when done
    pub fn toggle_pause(&mut self) -> TimerPhase {
        match self.phase {
            TimerPhase::Running => self.pause(),
            TimerPhase::Paused => self.resume(),
            TimerPhase::Done => {}
        }
        self.phase
    }

    pub fn pause(&mut self) {
        if self.exited || self.phase != TimerPhase::Running {
            return;
        }
        self.ticking = false;
        self.phase = TimerPhase::Paused;
        info!("Paused at tick {}", self.tick_count);
    }

    /// Resume and re-announce the current tick without advancing
    pub fn resume(&mut self) {
        if self.exited || self.phase != TimerPhase::Paused {
            return;
        }
        self.phase = TimerPhase::Running;
        info!("Resumed at tick {}", self.tick_count);
        self.dispatch(self.tick_count);
        self.ticking = true;
    }

    /// Leave the timer and hand control back to navigation.
    ///
    /// The controller is finished afterwards: further commands are no-ops.
    pub fn exit(&mut self) -> Navigation {
        info!("Exiting timer at tick {}", self.tick_count);
        self.exited = true;
        self.detach();
        Navigation::ToConfig
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Speak and play whatever the record for tick `n` asks for
    fn dispatch(&self, n: u64) -> TickRecord {
        let record = self.schedule.record(n);
        if let Some(text) = &record.tts {
            info!(
                "{} [{}] {}",
                record.label,
                format_seconds(record.secs),
                next_hint(self.schedule.next_record(n).as_ref())
            );
            self.audio.speak(text);
        }
        debug!("tick {}: {} {}s", n, record.label_key, record.secs);
        if let Some(sfx) = record.sfx {
            for cue in sfx.cues() {
                self.audio.play(*cue);
            }
        }
        record
    }

    fn acquire_wake_lock(&mut self) {
        if !self.wake_lock_held {
            self.wake_lock.request();
            self.wake_lock_held = true;
        }
    }

    fn release_wake_lock(&mut self) {
        if self.wake_lock_held {
            self.wake_lock.release();
            self.wake_lock_held = false;
        }
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.detach();
    }
}
