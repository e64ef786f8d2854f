//! Screen wake-lock implementations

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::process::{Child, Command};
use tracing::{info, warn};

use super::WakeLock;

/// Holds a `systemd-inhibit` child process for as long as the lock is held
#[derive(Debug, Default)]
pub struct InhibitWakeLock {
    child: Mutex<Option<Child>>,
}

impl InhibitWakeLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.child.lock().map(|c| c.is_some()).unwrap_or(false)
    }
}

impl WakeLock for InhibitWakeLock {
    fn request(&self) {
        let mut child = match self.child.lock() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to lock wake-lock state: {}", e);
                return;
            }
        };
        if child.is_some() {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            warn!("Screen wake lock error: no async runtime available");
            return;
        }

        let spawned = Command::new("systemd-inhibit")
            .args([
                "--what=idle:sleep",
                "--who=hiit-timer",
                "--why=Workout in progress",
                "sleep",
                "infinity",
            ])
            .kill_on_drop(true)
            .spawn();
        match spawned {
            Ok(process) => {
                info!("Screen wake lock acquired.");
                *child = Some(process);
            }
            Err(e) => warn!("Screen wake lock error: {}", e),
        }
    }

    fn release(&self) {
        let mut child = match self.child.lock() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to lock wake-lock state: {}", e);
                return;
            }
        };
        if let Some(mut process) = child.take() {
            if let Err(e) = process.start_kill() {
                warn!("Failed to stop systemd-inhibit: {}", e);
            }
            info!("Screen wake lock released");
        }
    }
}

/// Stand-in for platforms without a wake-lock
#[derive(Debug, Default)]
pub struct NoopWakeLock {
    warned: AtomicBool,
}

impl NoopWakeLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WakeLock for NoopWakeLock {
    fn request(&self) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!("Screen wake lock not supported!");
        }
    }

    fn release(&self) {}

    fn is_supported(&self) -> bool {
        false
    }
}
