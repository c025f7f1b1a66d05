use std::time::{Duration, Instant};

/// Counters and timer shared by a load or a sort run.
///
/// `total` is what a run expects `current` to reach. For the quadratic sorts it is an estimate, so
/// `current` may pass it and [ProgressTracker::percentage] may exceed 100. Only
/// [ProgressTracker::display_percentage] clamps.
///
/// # Examples
/// ```
/// use sort_bench::progress::ProgressTracker;
/// let mut tracker = ProgressTracker::new();
/// tracker.set_total(4);
/// tracker.set_current(6);
/// assert_eq!(tracker.percentage(), 150.0);
/// assert_eq!(tracker.display_percentage(), 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    current: u64,
    total: u64,
    comparisons: u64,
    swaps: u64,
    start: Instant,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        ProgressTracker::new()
    }
}

impl ProgressTracker {
    pub fn new() -> ProgressTracker {
        ProgressTracker {
            current: 0,
            total: 0,
            comparisons: 0,
            swaps: 0,
            start: Instant::now(),
        }
    }

    /// Zero position and operation counters and restart the timer. The total is kept.
    pub fn reset(&mut self) {
        self.current = 0;
        self.comparisons = 0;
        self.swaps = 0;
        self.start = Instant::now();
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    pub fn set_current(&mut self, current: u64) {
        self.current = current;
    }

    pub fn increment(&mut self) {
        self.current += 1;
    }

    pub fn increment_comparisons(&mut self) {
        self.comparisons += 1;
    }

    pub fn increment_swaps(&mut self) {
        self.swaps += 1;
    }

    /// Mark the tracked operation as done. A position already past the total is left as is.
    pub fn finish(&mut self) {
        if self.current < self.total {
            self.current = self.total;
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Raw percentage, not clamped
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.current as f64 / self.total as f64
        }
    }

    /// Percentage clamped to 0..=100 for rendering
    pub fn display_percentage(&self) -> f64 {
        self.percentage().clamp(0.0, 100.0)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Estimated time remaining at the current rate
    pub fn eta(&self) -> Duration {
        self.eta_for(self.elapsed())
    }

    fn eta_for(&self, elapsed: Duration) -> Duration {
        if self.current == 0 || self.total == 0 || elapsed.is_zero() || self.current >= self.total {
            return Duration::ZERO;
        }
        let rate = self.current as f64 / elapsed.as_secs_f64();
        Duration::from_secs_f64((self.total - self.current) as f64 / rate)
    }
}

/// Receives batched progress notifications from loads and sorts.
///
/// Implementations are called synchronously on the working thread, so they should be cheap.
pub trait ProgressObserver {
    fn update(&mut self, label: &str, tracker: &ProgressTracker);

    fn finish(&mut self, label: &str, tracker: &ProgressTracker);
}

/// Ignores all progress
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&mut self, _label: &str, _tracker: &ProgressTracker) {}

    fn finish(&mut self, _label: &str, _tracker: &ProgressTracker) {}
}

/// Writes progress through the `log` facade, updates at debug level and completion at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn update(&mut self, label: &str, tracker: &ProgressTracker) {
        log::debug!(
            "{label}: {:.1}%, elapsed: {:.2}s, eta: {:.1}s",
            tracker.display_percentage(),
            tracker.elapsed().as_secs_f64(),
            tracker.eta().as_secs_f64(),
        );
    }

    fn finish(&mut self, label: &str, tracker: &ProgressTracker) {
        log::info!(
            "{label}: done in {:.3}s, comparisons: {}, swaps: {}",
            tracker.elapsed().as_secs_f64(),
            tracker.comparisons(),
            tracker.swaps(),
        );
    }
}

/// Render a single line progress bar such as `[=========>----------]  45.0%`.
pub fn render_bar(tracker: &ProgressTracker, width: usize) -> String {
    let percentage = tracker.display_percentage();
    let filled = (width as f64 * percentage / 100.0) as usize;
    let mut bar = String::with_capacity(width + 10);
    bar.push('[');
    for i in 0..width {
        if i < filled {
            bar.push('=');
        } else if i == filled && percentage < 100.0 {
            bar.push('>');
        } else {
            bar.push('-');
        }
    }
    bar.push(']');
    bar.push_str(&format!(" {:5.1}%", percentage));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_without_total() {
        let mut tracker = ProgressTracker::new();
        tracker.set_current(10);
        assert_eq!(tracker.percentage(), 0.0);
        assert_eq!(tracker.eta(), Duration::ZERO);
    }

    #[test]
    fn test_reset_keeps_total() {
        let mut tracker = ProgressTracker::new();
        tracker.set_total(100);
        tracker.increment();
        tracker.increment_comparisons();
        tracker.increment_swaps();
        tracker.reset();
        assert_eq!(tracker.total(), 100);
        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.comparisons(), 0);
        assert_eq!(tracker.swaps(), 0);
    }

    #[test]
    fn test_eta() {
        let mut tracker = ProgressTracker::new();
        tracker.set_total(100);
        tracker.set_current(25);
        assert_eq!(tracker.eta_for(Duration::from_secs(10)), Duration::from_secs(30));
        assert_eq!(tracker.eta_for(Duration::ZERO), Duration::ZERO);
        tracker.set_current(150);
        assert_eq!(tracker.eta_for(Duration::from_secs(10)), Duration::ZERO);
    }

    #[test]
    fn test_finish_keeps_overshoot() {
        let mut tracker = ProgressTracker::new();
        tracker.set_total(10);
        tracker.set_current(3);
        tracker.finish();
        assert_eq!(tracker.current(), 10);
        tracker.set_current(25);
        tracker.finish();
        assert_eq!(tracker.current(), 25);
        assert_eq!(tracker.percentage(), 250.0);
    }

    #[test]
    fn test_render_bar() {
        let mut tracker = ProgressTracker::new();
        tracker.set_total(10);
        tracker.set_current(5);
        assert_eq!(render_bar(&tracker, 10), "[=====>----]  50.0%");
        tracker.set_current(30);
        assert_eq!(render_bar(&tracker, 4), "[====] 100.0%");
    }
}
