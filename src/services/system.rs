//! Host capability checks

use tokio::process::Command;
use tracing::{debug, info};

/// Check whether `program` can be executed on this system
pub async fn command_available(program: &str) -> bool {
    match Command::new(program).arg("--version").output().await {
        Ok(_) => {
            info!("{} is available", program);
            true
        }
        Err(e) => {
            debug!("{} is not available: {}", program, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        assert!(!command_available("hiit-timer-definitely-not-installed").await);
    }
}
