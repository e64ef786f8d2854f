#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use hiit_timer::services::{AudioOutput, WakeLock};
use hiit_timer::state::Cue;
use hiit_timer::{Schedule, TimerConfig, TimerController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Played {
    Speak(String),
    Cue(Cue),
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    events: Mutex<Vec<Played>>,
}

impl RecordingAudio {
    pub fn take(&self) -> Vec<Played> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl AudioOutput for RecordingAudio {
    fn play(&self, cue: Cue) {
        self.events.lock().unwrap().push(Played::Cue(cue));
    }

    fn speak(&self, text: &str) {
        self.events.lock().unwrap().push(Played::Speak(text.to_string()));
    }
}

#[derive(Debug, Default)]
pub struct CountingWakeLock {
    pub requests: AtomicUsize,
    pub releases: AtomicUsize,
}

impl CountingWakeLock {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl WakeLock for CountingWakeLock {
    fn request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Two exercises, two sets, five seconds on, five off
pub fn sample_config() -> TimerConfig {
    TimerConfig::new(vec!["ex1".to_string(), "ex2".to_string()], 2, 5, 5)
}

pub fn controller(
    config: TimerConfig,
) -> (TimerController, Arc<RecordingAudio>, Arc<CountingWakeLock>) {
    let audio = Arc::new(RecordingAudio::default());
    let lock = Arc::new(CountingWakeLock::default());
    let controller = TimerController::new(Schedule::new(config), audio.clone(), lock.clone());
    (controller, audio, lock)
}
