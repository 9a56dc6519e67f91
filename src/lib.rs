//! # pod-fetch
//!
//! Batched proof-of-delivery (POD) retrieval for shipment tracking numbers.
//!
//! Given a list of tracking numbers, the pipeline splits them into fixed-size
//! batches, calls the tracking API once per batch with bounded retries, and
//! downloads each returned record's file into a per-tracking-number folder
//! over a bounded worker pool. The aggregated records plus the original input
//! table are written to a two-sheet spreadsheet report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pod_fetch::{Config, PodPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = PodPipeline::new(Config::default())?;
//!
//!     let tracking_numbers = vec!["SPX100001".to_string(), "SPX100002".to_string()];
//!     let records = pipeline.run(&tracking_numbers, "pods".as_ref()).await;
//!
//!     println!("fetched {} records", records.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Retrying tracking API client
pub mod api;
/// Configuration types
pub mod config;
/// Per-record file downloading
pub mod download;
/// Error types
pub mod error;
/// Input collaborators (file picking, confirmation gate)
pub mod input;
/// Batch orchestration pipeline
pub mod pipeline;
/// Spreadsheet input parsing and report writing
pub mod report;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use api::PodClient;
pub use config::{ApiConfig, Config, PipelineConfig, RetryConfig};
pub use download::FileFetcher;
pub use error::{Error, Result};
pub use input::{InputSource, PromptInput};
pub use pipeline::PodPipeline;
pub use report::InputTable;
pub use types::{DownloadOutcome, PodRecord, PodRequest, PodResponse};
