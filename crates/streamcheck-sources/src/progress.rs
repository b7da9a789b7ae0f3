use streamcheck_models::Title;
use tracing::{info, warn};

/// Display collaborator notified as listing pages complete
pub trait ProgressReporter: Send + Sync {
    /// Called once, before the first tick, with the number of ticks to expect
    fn start(&self, total: u64);
    fn tick(&self);
    fn finish(&self);
}

/// Reporter that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&self, _total: u64) {}
    fn tick(&self) {}
    fn finish(&self) {}
}

/// Tracks title resolution outcomes and emits periodic progress and a final
/// summary through `tracing`, so a long watchlist does not log every title.
pub struct ResolutionTracker {
    expected: usize,
    available: usize,
    unavailable: usize,
    skipped: usize,
    start_time: std::time::Instant,
    progress_interval: usize, // Log every N titles
    last_progress_log: usize,
}

impl ResolutionTracker {
    /// # Arguments
    /// * `expected` - Titles announced by the listing heading
    /// * `progress_interval` - Log progress every N titles
    pub fn new(expected: usize, progress_interval: usize) -> Self {
        if expected > 10 {
            info!("Resolving watchlist: {} titles to process", expected);
        }
        Self {
            expected,
            available: 0,
            unavailable: 0,
            skipped: 0,
            start_time: std::time::Instant::now(),
            progress_interval: progress_interval.max(1),
            last_progress_log: 0,
        }
    }

    pub fn record(&mut self, title: &Title) {
        if title.available() {
            self.available += 1;
        } else {
            self.unavailable += 1;
        }
    }

    /// Posters that could not be turned into a title
    pub fn record_skipped(&mut self, count: usize) {
        self.skipped += count;
    }

    pub fn processed(&self) -> usize {
        self.available + self.unavailable
    }

    pub fn available(&self) -> usize {
        self.available
    }

    pub fn unavailable(&self) -> usize {
        self.unavailable
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Log progress if the interval has been reached since the last line
    pub fn log_progress(&mut self) {
        let current = self.processed();
        if current - self.last_progress_log < self.progress_interval {
            return;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 { current as f64 / elapsed } else { 0.0 };

        info!(
            "Progress: {}/{} ({:.1} titles/sec) | Available: {} | Unavailable: {}",
            current, self.expected, rate, self.available, self.unavailable
        );
        self.last_progress_log = current;
    }

    pub fn log_summary(&self, operation_name: &str) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if self.skipped > 0 {
            warn!(
                "{} completed: {} titles in {:.1}s | Available: {} | Unavailable: {} | Skipped posters: {}",
                operation_name,
                self.processed(),
                elapsed,
                self.available,
                self.unavailable,
                self.skipped
            );
        } else {
            info!(
                "{} completed: {} titles in {:.1}s | Available: {} | Unavailable: {}",
                operation_name,
                self.processed(),
                elapsed,
                self.available,
                self.unavailable
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts_outcomes() {
        let mut tracker = ResolutionTracker::new(3, 2);
        tracker.record(&Title::new("A").with_platforms(["Netflix"]));
        tracker.record(&Title::new("B"));
        tracker.log_progress();
        tracker.record(&Title::new("C"));
        tracker.record_skipped(1);

        assert_eq!(tracker.processed(), 3);
        assert_eq!(tracker.available(), 1);
        assert_eq!(tracker.unavailable(), 2);
        assert_eq!(tracker.skipped(), 1);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut tracker = ResolutionTracker::new(1, 0);
        tracker.record(&Title::new("A"));
        tracker.log_progress();
        assert_eq!(tracker.last_progress_log, 1);
    }
}
