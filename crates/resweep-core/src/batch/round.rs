//! A single concurrent sweep over the pending items.

use crate::batch::types::{IndexedItem, Outcome};
use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use tracing::debug;

/// Run the operation once on every pending item and wait for all of them.
///
/// Every future is created before any is polled, then all are driven together
/// on the current task. The returned outcomes follow the order of `pending`,
/// not completion order. A failing item yields [`Outcome::Failure`] and does
/// not affect its siblings.
pub async fn run_round<'a, T, R, E, F, Fut>(
    round: usize,
    pending: &[IndexedItem<'a, T>],
    operation: &F,
) -> Vec<Outcome<R>>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    let tasks = pending.iter().map(|entry| {
        let index = entry.index;
        let fut = operation(entry.item);
        async move {
            match fut.await {
                Ok(value) => Outcome::Success { index, value },
                Err(e) => {
                    debug!(round = round, index = index, error = %e, "Item failed");
                    Outcome::Failure { index }
                }
            }
        }
    });

    join_all(tasks).await
}

/// Split a round's outcomes into `(index, value)` successes and failed indices.
///
/// Both halves keep the positional order of `outcomes`.
pub fn partition_outcomes<R>(outcomes: Vec<Outcome<R>>) -> (Vec<(usize, R)>, Vec<usize>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Outcome::Success { index, value } => successes.push((index, value)),
            Outcome::Failure { index } => failures.push(index),
        }
    }

    (successes, failures)
}
