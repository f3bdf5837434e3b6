//! Progress tracking across retry rounds.

use crate::batch::types::RoundProgress;
use std::time::{Duration, Instant};

/// Tracks progress of a batch across rounds.
#[derive(Debug, Clone)]
pub struct BatchProgressTracker {
    /// Total number of items to process.
    pub total: usize,
    /// Items that have succeeded so far.
    pub succeeded: usize,
    /// Items that failed in the latest round.
    pub failed: usize,
    /// Items still waiting for a successful round.
    pub pending: usize,
    /// Rounds completed so far.
    pub rounds: usize,
    /// Configured round budget.
    pub max_rounds: usize,
    /// Start time of batch execution.
    pub start_time: Instant,
    /// Durations of completed rounds.
    pub durations: Vec<Duration>,
}

impl BatchProgressTracker {
    /// Create a new progress tracker.
    pub fn new(total: usize, max_rounds: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            pending: total,
            rounds: 0,
            max_rounds,
            start_time: Instant::now(),
            durations: Vec::new(),
        }
    }

    /// Update progress with a finished round.
    pub fn update(&mut self, progress: &RoundProgress) {
        self.succeeded += progress.succeeded;
        self.failed = progress.failed;
        self.pending = progress.pending;
        self.rounds = progress.round;
        self.max_rounds = progress.max_rounds;
        self.durations.push(progress.duration);
    }

    /// Average wall time per round.
    pub fn average_round(&self) -> String {
        if self.durations.is_empty() {
            return "0s".to_string();
        }

        let avg = self.durations.iter().sum::<Duration>() / self.durations.len() as u32;
        format_duration(avg)
    }

    /// Get completion percentage.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.total as f64) * 100.0
    }
}

/// Format duration as human-readable string.
pub(crate) fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else if total_secs > 0 {
        format!("{}s", seconds)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
