//! Data types for batch processing.

use std::sync::Arc;
use std::time::Duration;

/// An input item paired with its position in the original input.
///
/// Created once before the first round and carried through every retry
/// round unchanged.
#[derive(Debug)]
pub struct IndexedItem<'a, T> {
    /// Zero-based position in the original input.
    pub index: usize,
    /// Borrowed input item.
    pub item: &'a T,
}

// Derived impls would require `T: Clone`.
impl<T> Clone for IndexedItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IndexedItem<'_, T> {}

/// Tag every item with its original index.
pub fn index_items<T>(items: &[T]) -> Vec<IndexedItem<'_, T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| IndexedItem { index, item })
        .collect()
}

/// Result of applying the operation to one item in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    /// The operation completed normally.
    Success {
        /// Original index of the item.
        index: usize,
        /// Value returned by the operation.
        value: R,
    },
    /// The operation failed. The error is not retained.
    Failure {
        /// Original index of the item.
        index: usize,
    },
}

/// Result of batch processing.
#[derive(Debug, Clone)]
pub struct BatchReport<R> {
    /// Successfully processed items as `(index, value)`, sorted by index.
    ///
    /// Empty when result collection is disabled.
    pub successful: Vec<(usize, R)>,
    /// Indices of items that never succeeded within the round budget.
    pub failed: Vec<usize>,
    /// Number of rounds dispatched.
    pub rounds: usize,
    /// Total duration of batch processing.
    pub total_duration: Duration,
    /// Success rate as a percentage (0.0 to 100.0).
    pub success_rate: f64,
}

impl<R> BatchReport<R> {
    /// Create a new batch report.
    ///
    /// `total` is the number of input items, which may exceed
    /// `successful.len() + failed.len()` when results were not collected.
    pub fn new(
        successful: Vec<(usize, R)>,
        failed: Vec<usize>,
        total: usize,
        rounds: usize,
        total_duration: Duration,
    ) -> Self {
        let success_rate = if total > 0 {
            (total.saturating_sub(failed.len()) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self {
            successful,
            failed,
            rounds,
            total_duration,
            success_rate,
        }
    }

    /// Report for an empty input.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), 0, 0, Duration::ZERO)
    }

    /// Get total number of items accounted for in the report.
    pub fn total_items(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    /// Check if all items were successful.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Consume the report, keeping only the values in input order.
    pub fn into_values(self) -> Vec<R> {
        self.successful.into_iter().map(|(_, value)| value).collect()
    }
}

/// Snapshot of batch progress taken after each round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundProgress {
    /// Round that just finished (1-based).
    pub round: usize,
    /// Configured round budget.
    pub max_rounds: usize,
    /// Number of input items.
    pub total: usize,
    /// Items that succeeded in this round.
    pub succeeded: usize,
    /// Items that failed in this round.
    pub failed: usize,
    /// Items still pending after this round.
    pub pending: usize,
    /// Wall time of this round.
    pub duration: Duration,
}

/// Progress callback function type.
pub type ProgressCallback = Arc<dyn Fn(&RoundProgress) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_items_assigns_positions() {
        let items = vec!["a", "b", "c"];
        let indexed = index_items(&items);
        assert_eq!(indexed.len(), 3);
        for (position, entry) in indexed.iter().enumerate() {
            assert_eq!(entry.index, position);
            assert_eq!(*entry.item, items[position]);
        }
    }

    #[test]
    fn test_indexed_item_is_copy_without_clone_item() {
        struct NotClone(u8);
        let items = [NotClone(7)];
        let first = index_items(&items)[0];
        let second = first;
        assert_eq!(first.item.0, second.item.0);
    }

    #[test]
    fn test_report_success_rate() {
        let report = BatchReport::new(
            vec![(0, "a"), (2, "c"), (3, "d")],
            vec![1],
            4,
            2,
            Duration::from_millis(5),
        );
        assert_eq!(report.total_items(), 4);
        assert!(!report.is_complete_success());
        assert!((report.success_rate - 75.0).abs() < f64::EPSILON);
        assert_eq!(report.into_values(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_report_more_failures_than_total() {
        let report: BatchReport<()> =
            BatchReport::new(Vec::new(), vec![0, 1], 1, 1, Duration::ZERO);
        assert!(report.success_rate.abs() < f64::EPSILON);
        assert_eq!(report.failed, vec![0, 1]);
    }

    #[test]
    fn test_report_empty() {
        let report: BatchReport<()> = BatchReport::empty();
        assert_eq!(report.rounds, 0);
        assert!(report.is_complete_success());
        assert!(report.success_rate.abs() < f64::EPSILON);
    }
}
