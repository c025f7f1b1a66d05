use crate::algorithm::Algorithm;
use crate::cancel::CancelToken;
use crate::progress::{NoProgress, ProgressObserver, ProgressTracker};
use crate::record::Record;
use crate::sort_key::SortKey;

/// Number of elementary operations between progress updates of the quadratic sorts
pub const DEFAULT_UPDATE_FREQUENCY: u64 = 50;

const INSERTION_OUTER_UPDATE: usize = 100;
const MERGE_UPDATE: u64 = 10;

/// Terminal state of a sort run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// Instrumented in place sort of records.
///
/// Every comparison increments the tracker comparisons counter by one and every relocation of a
/// record, whether an exchange, a shift or a merge write, increments the swaps counter by one.
/// The cancellation token is polled at checkpoints; once it is observed the run returns
/// [RunOutcome::Cancelled] leaving the data as a permutation of its input.
///
/// # Examples
/// ```
/// use sort_bench::algorithm::Algorithm;
/// use sort_bench::progress::{NoProgress, ProgressTracker};
/// use sort_bench::record::Record;
/// use sort_bench::sort::{RunOutcome, Sorter};
/// use sort_bench::sort_key::SortKey;
///
/// fn sort_by_last_name(records: &mut [Record]) -> RunOutcome {
///     let sorter = Sorter::new(Algorithm::Merge, SortKey::LastName);
///     let mut tracker = ProgressTracker::new();
///     sorter.run(records, &mut tracker, &mut NoProgress)
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Sorter {
    algorithm: Algorithm,
    key: SortKey,
    cancel: CancelToken,
    update_frequency: u64,
}

impl Sorter {
    /// Create a Sorter with a fresh [CancelToken] and progress updates every 50 operations
    pub fn new(algorithm: Algorithm, key: SortKey) -> Sorter {
        Sorter {
            algorithm,
            key,
            cancel: CancelToken::new(),
            update_frequency: DEFAULT_UPDATE_FREQUENCY,
        }
    }

    /// Use a shared cancellation token
    pub fn with_cancel_token(&mut self, cancel: CancelToken) {
        self.cancel = cancel;
    }

    /// Set the number of elementary operations between progress updates of the quadratic sorts.
    /// Zero is treated as one.
    pub fn with_update_frequency(&mut self, update_frequency: u64) {
        self.update_frequency = update_frequency.max(1);
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn key(&self) -> SortKey {
        self.key
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Sort `data` in place, resetting `tracker` for this run
    pub fn run(
        &self,
        data: &mut [Record],
        tracker: &mut ProgressTracker,
        observer: &mut dyn ProgressObserver,
    ) -> RunOutcome {
        let label = self.algorithm.name();
        log::info!("Start {}, records: {}, column: {}", label, data.len(), self.key);
        let mut run = Run {
            key: self.key,
            cancel: &self.cancel,
            tracker,
            observer,
            label,
            update_frequency: self.update_frequency,
        };
        let outcome = match self.algorithm {
            Algorithm::Bubble => run.bubble(data),
            Algorithm::Insertion => run.insertion(data),
            Algorithm::Merge => run.merge_sort(data),
        };
        match outcome {
            RunOutcome::Completed => {
                run.tracker.finish();
                run.observer.finish(label, run.tracker);
                log::info!("Finish {}, comparisons: {}, swaps: {}", label, run.tracker.comparisons(), run.tracker.swaps());
            }
            RunOutcome::Cancelled => {
                log::warn!("{} cancelled, comparisons: {}, swaps: {}", label, run.tracker.comparisons(), run.tracker.swaps());
            }
        }
        outcome
    }
}

/// Sort `data` in place with `algorithm` ordering by `key`, without progress reporting.
pub fn sort(
    algorithm: Algorithm,
    key: SortKey,
    data: &mut [Record],
    tracker: &mut ProgressTracker,
    cancel: &CancelToken,
) -> RunOutcome {
    let mut sorter = Sorter::new(algorithm, key);
    sorter.with_cancel_token(cancel.clone());
    sorter.run(data, tracker, &mut NoProgress)
}

/// Check that `data` is non decreasing by `key`. Comparisons are not counted.
pub fn is_sorted(data: &[Record], key: SortKey) -> bool {
    data.windows(2).all(|pair| key.key(&pair[0]) <= key.key(&pair[1]))
}

struct Run<'a> {
    key: SortKey,
    cancel: &'a CancelToken,
    tracker: &'a mut ProgressTracker,
    observer: &'a mut dyn ProgressObserver,
    label: &'static str,
    update_frequency: u64,
}

impl<'a> Run<'a> {
    fn less(&mut self, a: &Record, b: &Record) -> bool {
        self.tracker.increment_comparisons();
        self.key.key(a) < self.key.key(b)
    }

    fn record_swap(&mut self) {
        self.tracker.increment_swaps();
    }

    fn cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn update(&mut self) {
        self.observer.update(self.label, self.tracker);
    }

    fn start(&mut self, total: u64) {
        self.tracker.set_total(total);
        self.tracker.reset();
    }

    fn bubble(&mut self, data: &mut [Record]) -> RunOutcome {
        let n = data.len();
        let total = (n as u64) * (n as u64).saturating_sub(1) / 2;
        self.start(total);
        if n <= 1 {
            return RunOutcome::Completed;
        }

        let mut operations: u64 = 0;
        for i in 0..n - 1 {
            if self.cancelled() {
                return RunOutcome::Cancelled;
            }
            let mut swapped = false;
            for j in 0..n - i - 1 {
                if self.cancelled() {
                    return RunOutcome::Cancelled;
                }
                operations += 1;
                if self.less(&data[j + 1], &data[j]) {
                    data.swap(j, j + 1);
                    self.record_swap();
                    swapped = true;
                }
                if operations % self.update_frequency == 0 {
                    self.tracker.set_current(operations);
                    self.update();
                }
            }
            if !swapped {
                self.tracker.set_current(total);
                break;
            }
        }
        RunOutcome::Completed
    }

    // Total is the average case shift count, descending input overshoots it.
    fn insertion(&mut self, data: &mut [Record]) -> RunOutcome {
        let n = data.len();
        let total = (n as u64) * (n as u64).saturating_sub(1) / 4;
        self.start(total);
        if n <= 1 {
            return RunOutcome::Completed;
        }

        let mut shifts: u64 = 0;
        for i in 1..n {
            if self.cancelled() {
                return RunOutcome::Cancelled;
            }
            // the held record sits at j and moves left one shift at a time
            let mut j = i;
            while j > 0 && self.less(&data[j], &data[j - 1]) {
                data.swap(j - 1, j);
                self.record_swap();
                j -= 1;
                shifts += 1;
                if shifts % self.update_frequency == 0 {
                    self.tracker.set_current(shifts);
                    self.update();
                }
            }
            if i % INSERTION_OUTER_UPDATE == 0 {
                self.tracker.set_current(shifts);
                self.update();
            }
        }
        self.tracker.set_current(shifts);
        RunOutcome::Completed
    }

    fn merge_sort(&mut self, data: &mut [Record]) -> RunOutcome {
        let n = data.len();
        let total = if n <= 1 { 0 } else { (n as f64 * (n as f64).log2()) as u64 };
        self.start(total);
        if n <= 1 {
            return RunOutcome::Completed;
        }
        let mut scratch = data.to_vec();
        self.merge_sort_range(data, &mut scratch, 0, n - 1)
    }

    fn merge_sort_range(&mut self, data: &mut [Record], scratch: &mut [Record], left: usize, right: usize) -> RunOutcome {
        if self.cancelled() {
            return RunOutcome::Cancelled;
        }
        if left >= right {
            return RunOutcome::Completed;
        }

        let mid = left + (right - left) / 2;
        if self.merge_sort_range(data, scratch, left, mid) == RunOutcome::Cancelled {
            return RunOutcome::Cancelled;
        }
        if self.merge_sort_range(data, scratch, mid + 1, right) == RunOutcome::Cancelled {
            return RunOutcome::Cancelled;
        }
        self.merge(data, scratch, left, mid, right);

        self.tracker.increment();
        if self.tracker.current() % MERGE_UPDATE == 0 {
            self.update();
        }
        RunOutcome::Completed
    }

    // Stable: the right run is taken only when strictly less than the left run.
    // Both runs are moved into scratch and merged back into data by exchange.
    fn merge(&mut self, data: &mut [Record], scratch: &mut [Record], left: usize, mid: usize, right: usize) {
        scratch[left..=right].swap_with_slice(&mut data[left..=right]);
        let (mut i, mut j) = (left, mid + 1);
        for k in left..=right {
            let take_right = if i > mid {
                true
            } else if j > right {
                false
            } else {
                self.less(&scratch[j], &scratch[i])
            };
            let source = if take_right {
                j += 1;
                j - 1
            } else {
                i += 1;
                i - 1
            };
            std::mem::swap(&mut data[k], &mut scratch[source]);
            self.record_swap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ids: &[i64]) -> Vec<Record> {
        ids.iter()
            .map(|id| Record::new(*id, &format!("n{id}"), "x").unwrap())
            .collect()
    }

    fn ids(data: &[Record]) -> Vec<i64> {
        data.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_trivial_inputs() {
        for algorithm in Algorithm::ALL {
            let mut tracker = ProgressTracker::new();
            let mut empty: Vec<Record> = vec![];
            assert_eq!(sort(algorithm, SortKey::Id, &mut empty, &mut tracker, &CancelToken::new()), RunOutcome::Completed);
            let mut single = records(&[4]);
            assert_eq!(sort(algorithm, SortKey::Id, &mut single, &mut tracker, &CancelToken::new()), RunOutcome::Completed);
            assert_eq!(tracker.comparisons(), 0);
            assert_eq!(tracker.swaps(), 0);
        }
    }

    #[test]
    fn test_bubble_counts_on_reversed_pair() {
        let mut data = records(&[2, 1]);
        let mut tracker = ProgressTracker::new();
        sort(Algorithm::Bubble, SortKey::Id, &mut data, &mut tracker, &CancelToken::new());
        assert_eq!(ids(&data), vec![1, 2]);
        assert_eq!(tracker.comparisons(), 1);
        assert_eq!(tracker.swaps(), 1);
        assert_eq!(tracker.total(), 1);
    }

    #[test]
    fn test_insertion_counts() {
        let mut data = records(&[3, 1, 2]);
        let mut tracker = ProgressTracker::new();
        sort(Algorithm::Insertion, SortKey::Id, &mut data, &mut tracker, &CancelToken::new());
        assert_eq!(ids(&data), vec![1, 2, 3]);
        // i=1: 1<3 shift, stop at start; i=2: 2<3 shift, 2<1 no
        assert_eq!(tracker.comparisons(), 3);
        assert_eq!(tracker.swaps(), 2);
    }

    #[test]
    fn test_merge_total_estimate() {
        let mut data = records(&[5, 4, 3, 2, 1, 6, 8, 7]);
        let mut tracker = ProgressTracker::new();
        sort(Algorithm::Merge, SortKey::Id, &mut data, &mut tracker, &CancelToken::new());
        assert_eq!(tracker.total(), 24);
        assert_eq!(tracker.current(), 24);
        assert_eq!(tracker.swaps(), 24);
        assert!(is_sorted(&data, SortKey::Id));
    }

    #[test]
    fn test_merge_reversed_counts() {
        let mut data = records(&(1..=16).rev().collect::<Vec<i64>>());
        let mut tracker = ProgressTracker::new();
        sort(Algorithm::Merge, SortKey::Id, &mut data, &mut tracker, &CancelToken::new());
        assert_eq!(ids(&data), (1..=16).collect::<Vec<i64>>());
        // every right run empties first: 8 + 4*2 + 2*4 + 8
        assert_eq!(tracker.comparisons(), 32);
        assert_eq!(tracker.swaps(), 64);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        for algorithm in Algorithm::ALL {
            let mut data = records(&[3, 2, 1]);
            let mut tracker = ProgressTracker::new();
            assert_eq!(sort(algorithm, SortKey::Id, &mut data, &mut tracker, &cancel), RunOutcome::Cancelled);
            assert_eq!(ids(&data), vec![3, 2, 1]);
            assert_eq!(tracker.comparisons(), 0);
        }
    }
}
