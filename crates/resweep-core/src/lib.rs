//! resweep core - concurrent batch execution with retry rounds.
//!
//! Applies an async operation to every item of a slice concurrently, then
//! re-dispatches only the items that failed, for a bounded number of rounds.
//! Results come back in input order.
//!
//! # Example
//!
//! ```rust,no_run
//! use resweep_core::{BatchConfig, BatchProcessor};
//!
//! #[tokio::main]
//! async fn main() -> resweep_core::Result<()> {
//!     let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];
//!     let processor = BatchProcessor::new(BatchConfig::default().with_max_rounds(3));
//!
//!     let report = processor
//!         .process(&urls, |url: &String| {
//!             let url = url.clone();
//!             async move { Ok::<_, std::io::Error>(url.len()) }
//!         })
//!         .await?;
//!
//!     println!("{:?}", report.into_values());
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;

pub use batch::error::Result;
pub use batch::{BatchError, BatchProcessor, BatchReport, Outcome, process, process_blocking};
pub use config::{BatchConfig, ConfigError};
