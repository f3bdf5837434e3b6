//! Batch processing with round-based retry of failed items.

pub mod blocking;
pub mod error;
pub mod formats;
pub mod input;
pub mod processor;
pub mod progress;
pub mod round;
pub mod types;
pub mod ui;

pub use blocking::process_blocking;
pub use error::BatchError;
pub use input::{parse_input, parse_input_file};
pub use processor::{BatchProcessor, process};
pub use progress::BatchProgressTracker;
pub use types::{BatchReport, IndexedItem, Outcome, ProgressCallback, RoundProgress};
pub use ui::{render_progress, render_summary};
