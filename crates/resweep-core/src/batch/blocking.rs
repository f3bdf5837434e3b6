//! Synchronous entry point for callers outside an async runtime.

use crate::batch::error::{BatchError, Result};
use crate::batch::processor::BatchProcessor;
use crate::batch::types::BatchReport;
use crate::config::BatchConfig;
use std::fmt::Display;
use std::future::Future;

/// Run [`BatchProcessor::process`] to completion on a fresh current-thread
/// runtime, blocking the calling thread.
///
/// Fails with [`BatchError::Runtime`] when called from within a Tokio runtime.
pub fn process_blocking<'a, T, R, E, F, Fut>(
    config: BatchConfig,
    items: &'a [T],
    operation: F,
) -> Result<BatchReport<R>>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
    E: Display,
{
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(BatchError::Runtime(
            "process_blocking called from within a Tokio runtime".to_string(),
        ));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BatchError::Runtime(format!("Failed to build runtime: {}", e)))?;

    let processor = BatchProcessor::new(config);
    runtime.block_on(processor.process(items, operation))
}
