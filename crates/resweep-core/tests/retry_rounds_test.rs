//! Integration tests for the retry-round contract.

use resweep_core::{BatchConfig, BatchError, BatchProcessor, process};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Fails the first `failures` calls for every item, then succeeds.
struct Flaky {
    failures: usize,
    attempts: Mutex<HashMap<String, usize>>,
    calls: AtomicUsize,
}

impl Flaky {
    fn new(failures: usize) -> Self {
        Self {
            failures,
            attempts: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn attempt(&self, item: &str) -> Result<String, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut attempts = self.attempts.lock().unwrap();
        let count = attempts.entry(item.to_string()).or_insert(0);
        *count += 1;
        if *count <= self.failures {
            Err(format!("{} failed attempt {}", item, count))
        } else {
            Ok(format!("fetched {}", item))
        }
    }
}

fn items() -> Vec<String> {
    vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()]
}

#[tokio::test]
async fn test_order_preserved_when_middle_item_is_slowest() {
    let items = items();
    let values = process(&items, |item: &String| {
        let item = item.clone();
        async move {
            let delay = if item == "beta" { 50 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<_, String>(item.to_uppercase())
        }
    })
    .await
    .unwrap();

    assert_eq!(values, vec!["ALPHA", "BETA", "GAMMA"]);
}

#[tokio::test]
async fn test_bounded_retry_fails_with_k_rounds() {
    let k = 3;
    let items = items();
    let flaky = Flaky::new(k);
    let processor = BatchProcessor::new(BatchConfig::default().with_max_rounds(k));

    let result = processor
        .process(&items, |item: &String| {
            let outcome = flaky.attempt(item);
            async move { outcome }
        })
        .await;

    assert!(matches!(result, Err(BatchError::RoundsExhausted { rounds: 3, remaining: 3 })));
}

#[tokio::test]
async fn test_bounded_retry_succeeds_with_k_plus_one_rounds() {
    let k = 3;
    let items = items();
    let flaky = Flaky::new(k);
    let processor = BatchProcessor::new(BatchConfig::default().with_max_rounds(k + 1));

    let report = processor
        .process(&items, |item: &String| {
            let outcome = flaky.attempt(item);
            async move { outcome }
        })
        .await
        .unwrap();

    assert_eq!(report.rounds, k + 1);
    assert_eq!(
        report.into_values(),
        vec!["fetched alpha", "fetched beta", "fetched gamma"]
    );
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 3 * (k + 1));
}

#[tokio::test]
async fn test_failure_isolation_with_ignore_error() {
    let items = vec!["broken".to_string(), "fine".to_string()];

    for max_rounds in 1..=4 {
        let processor = BatchProcessor::new(
            BatchConfig::default()
                .with_max_rounds(max_rounds)
                .with_ignore_error(true),
        );

        let report = processor
            .process(&items, |item: &String| {
                let item = item.clone();
                async move {
                    if item == "broken" {
                        Err("connection reset")
                    } else {
                        Ok(item)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(report.successful, vec![(1, "fine".to_string())]);
        assert_eq!(report.failed, vec![0]);
        assert_eq!(report.rounds, max_rounds);
    }
}

#[tokio::test]
async fn test_success_path_independent_of_round_budget() {
    let items: Vec<u32> = (0..20).collect();
    let square = |n: &u32| {
        let n = *n;
        async move { Ok::<_, String>(n * n) }
    };

    let single = BatchProcessor::new(BatchConfig::default().with_max_rounds(1))
        .process(&items, square)
        .await
        .unwrap();
    let five = BatchProcessor::new(BatchConfig::default().with_max_rounds(5))
        .process(&items, square)
        .await
        .unwrap();

    assert_eq!(single.successful, five.successful);
    assert_eq!(single.rounds, 1);
    assert_eq!(five.rounds, 1);
}

#[tokio::test]
async fn test_empty_input_never_invokes_operation() {
    let items: Vec<String> = Vec::new();
    let calls = AtomicUsize::new(0);

    let values = process(&items, |_: &String| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok::<u8, String>(0) }
    })
    .await
    .unwrap();

    assert!(values.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_terminal_failure_counts_every_dispatch() {
    let items: Vec<usize> = (0..5).collect();
    let calls = AtomicUsize::new(0);
    let processor = BatchProcessor::new(BatchConfig::default().with_max_rounds(3));

    let err = processor
        .process(&items, |_: &usize| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(std::io::Error::other("unreachable host")) }
        })
        .await
        .unwrap_err();

    assert_eq!(err, BatchError::RoundsExhausted { rounds: 3, remaining: 5 });
    assert_eq!(calls.load(Ordering::SeqCst), 15);
}

#[tokio::test]
async fn test_operation_may_borrow_items() {
    async fn measure(item: &str) -> Result<usize, String> {
        tokio::task::yield_now().await;
        Ok(item.len())
    }

    let items = items();
    let values = process(&items, |item: &String| measure(item)).await.unwrap();
    assert_eq!(values, vec![5, 4, 5]);
}
