//! Retry controller that drives rounds until every item succeeds.

use crate::batch::error::{BatchError, Result};
use crate::batch::round::{partition_outcomes, run_round};
use crate::batch::types::{BatchReport, IndexedItem, ProgressCallback, RoundProgress, index_items};
use crate::config::BatchConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Batch processor that applies an async operation to every item and
/// re-dispatches only the failed items, round by round.
///
/// Each round is fully concurrent and has no concurrency cap. Rounds run
/// strictly one after another.
pub struct BatchProcessor {
    /// Round budget and result handling.
    config: BatchConfig,
    /// Invoked after every round.
    progress_callback: Option<ProgressCallback>,
}

impl BatchProcessor {
    /// Create a new batch processor.
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            progress_callback: None,
        }
    }

    /// Install a callback that receives a [`RoundProgress`] after each round.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Configuration this processor runs with.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process a batch of items.
    ///
    /// # Arguments
    /// * `items` - Items to process, borrowed for the whole call
    /// * `operation` - Async function applied to each item
    ///
    /// # Returns
    /// A report whose successes are sorted by original index. Fails with
    /// [`BatchError::RoundsExhausted`] if items are still failing after the
    /// last round and `ignore_error` is off.
    pub async fn process<'a, T, R, E, F, Fut>(
        &self,
        items: &'a [T],
        operation: F,
    ) -> Result<BatchReport<R>>
    where
        F: Fn(&'a T) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Display,
    {
        self.config.validate()?;

        let start_time = Instant::now();
        let total = items.len();

        if total == 0 {
            return Ok(BatchReport::empty());
        }

        let max_rounds = self.config.max_rounds;
        debug!(
            total_items = total,
            max_rounds = max_rounds,
            collect_results = self.config.collect_results,
            "Starting batch processing"
        );

        let mut pending: Vec<IndexedItem<'a, T>> = index_items(items);
        let mut successful: Vec<(usize, R)> = Vec::new();
        let mut rounds = 0;

        while rounds < max_rounds && !pending.is_empty() {
            rounds += 1;
            let round_start = Instant::now();

            let outcomes = run_round(rounds, &pending, &operation).await;
            let (succeeded, failed) = partition_outcomes(outcomes);
            let succeeded_count = succeeded.len();

            if self.config.collect_results {
                successful.extend(succeeded);
            }

            // Failed indices keep the positional order of the previous pending
            // set, which is ascending by index.
            let mut retry = failed.iter().copied().peekable();
            pending.retain(|entry| {
                if retry.peek() == Some(&entry.index) {
                    retry.next();
                    true
                } else {
                    false
                }
            });

            debug!(
                round = rounds,
                succeeded = succeeded_count,
                failed = pending.len(),
                "Round completed"
            );

            if let Some(cb) = &self.progress_callback {
                cb(&RoundProgress {
                    round: rounds,
                    max_rounds,
                    total,
                    succeeded: succeeded_count,
                    failed: failed.len(),
                    pending: pending.len(),
                    duration: round_start.elapsed(),
                });
            }
        }

        if !pending.is_empty() {
            warn!(
                rounds = rounds,
                remaining = pending.len(),
                ignore_error = self.config.ignore_error,
                "Rounds exhausted with items still failing"
            );

            if !self.config.ignore_error {
                return Err(BatchError::RoundsExhausted {
                    rounds,
                    remaining: pending.len(),
                });
            }
        }

        successful.sort_unstable_by_key(|(index, _)| *index);
        let failed: Vec<usize> = pending.iter().map(|entry| entry.index).collect();
        let total_duration = start_time.elapsed();

        debug!(
            total_items = total,
            successful = total.saturating_sub(failed.len()),
            failed = failed.len(),
            rounds = rounds,
            duration_ms = total_duration.as_millis() as u64,
            "Batch processing completed"
        );

        Ok(BatchReport::new(successful, failed, total, rounds, total_duration))
    }

    /// Process a batch for its side effects only.
    ///
    /// Operation return values are dropped as they arrive regardless of
    /// `collect_results`.
    pub async fn process_and_forget<'a, T, R, E, F, Fut>(
        &self,
        items: &'a [T],
        operation: F,
    ) -> Result<()>
    where
        F: Fn(&'a T) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Display,
    {
        let processor = BatchProcessor {
            config: self.config.clone().with_collect_results(false),
            progress_callback: self.progress_callback.clone(),
        };
        processor.process(items, operation).await.map(|_| ())
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

/// Process items with the default configuration and return the values in
/// input order.
pub async fn process<'a, T, R, E, F, Fut>(items: &'a [T], operation: F) -> Result<Vec<R>>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
    E: Display,
{
    BatchProcessor::default()
        .process(items, operation)
        .await
        .map(BatchReport::into_values)
}
