use std::time::{Duration, Instant};
use tracing::info;

/// Logs elapsed wall-clock time for a command when dropped.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        info!(task = label, "started");
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!(task = self.label, elapsed = ?self.start.elapsed(), "finished");
    }
}

/// Player references from a list file: one per line, `#` comments and
/// blank lines ignored.
pub fn read_player_list(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .collect()
}
