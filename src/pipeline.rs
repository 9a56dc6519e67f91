//! Batch orchestration — splits tracking numbers into fixed-size batches,
//! drives the API client per batch, and fans file downloads out over a
//! bounded worker pool.

use crate::api::PodClient;
use crate::config::Config;
use crate::download::FileFetcher;
use crate::error::Result;
use crate::types::{DownloadOutcome, PodRecord};
use futures::stream::{self, StreamExt};
use std::path::Path;

/// The batched fetch-and-download pipeline
#[derive(Clone, Debug)]
pub struct PodPipeline {
    client: PodClient,
    fetcher: FileFetcher,
    config: Config,
}

impl PodPipeline {
    /// Build a pipeline from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = PodClient::new(config.api.clone())?;
        let fetcher = FileFetcher::new(config.pipeline.download_timeout)?;
        Ok(Self {
            client,
            fetcher,
            config,
        })
    }

    /// Run the full pipeline over a deduplicated tracking-number list
    ///
    /// The input is partitioned into consecutive batches of
    /// `pipeline.batch_size`. Batches are processed strictly sequentially:
    /// one API call (with retries), then the batch's downloads through the
    /// worker pool, fully joined before the next batch starts. A batch whose
    /// API call yields no records is skipped — no download phase, no error.
    ///
    /// Returns every record collected, in batch order; within a batch, the
    /// order the API returned them.
    pub async fn run(&self, tracking_numbers: &[String], output_dir: &Path) -> Vec<PodRecord> {
        let batch_size = self.config.pipeline.batch_size;
        let total_batches = tracking_numbers.len().div_ceil(batch_size);
        tracing::info!(
            tracking_numbers = tracking_numbers.len(),
            total_batches,
            "Starting POD fetch"
        );

        let mut results: Vec<PodRecord> = Vec::new();
        for (index, batch) in tracking_numbers.chunks(batch_size).enumerate() {
            tracing::info!(batch = index + 1, total_batches, "Processing batch");

            let records = self.client.fetch_batch(batch).await;
            if records.is_empty() {
                continue;
            }

            let start = results.len();
            results.extend(records);
            let saved = self.download_batch(&results[start..], output_dir).await;

            tracing::info!(
                batch = index + 1,
                records = results.len() - start,
                saved,
                "Batch complete"
            );
        }

        results
    }

    /// Download all files for one batch over the bounded worker pool
    ///
    /// Returns the number of files saved. Failures are counted, never raised;
    /// the pool is fully drained before this returns.
    async fn download_batch(&self, records: &[PodRecord], output_dir: &Path) -> usize {
        let outcomes: Vec<DownloadOutcome> = stream::iter(records)
            .map(|record| self.fetcher.fetch_file(record, output_dir))
            .buffer_unordered(self.config.pipeline.download_workers)
            .collect()
            .await;

        outcomes
            .iter()
            .filter(|outcome| **outcome == DownloadOutcome::Saved)
            .count()
    }
}
