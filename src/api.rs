//! Retrying client for the batch POD lookup API
//!
//! One call covers one batch of tracking numbers. Failed attempts are retried
//! with a fixed delay; exhausting the attempts is not an error at this
//! boundary — the batch just yields no records and the pipeline moves on.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{PodRecord, PodRequest, PodResponse};

/// Client for the batch POD lookup endpoint
#[derive(Clone, Debug)]
pub struct PodClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl PodClient {
    /// Create a client with the request timeout from `config`
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch POD records for one batch of tracking numbers
    ///
    /// An attempt fails on a transport error, a non-success HTTP status, or a
    /// response whose `success` flag is false or missing. Attempts are spaced
    /// by the configured fixed delay; the first success returns its payload
    /// immediately. Once all attempts are exhausted this returns an empty
    /// vec — the caller treats that as "no records for this batch", never as
    /// a fatal error.
    pub async fn fetch_batch(&self, tracking_numbers: &[String]) -> Vec<PodRecord> {
        let max_attempts = self.config.retry.max_attempts;

        for attempt in 1..=max_attempts {
            match self.try_fetch(tracking_numbers).await {
                Ok(records) => return records,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        max_attempts,
                        "API call failed"
                    );
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.config.retry.delay).await;
            }
        }

        tracing::error!(
            batch_size = tracking_numbers.len(),
            "All API attempts exhausted, skipping batch"
        );
        Vec::new()
    }

    /// One POST attempt against the lookup endpoint
    async fn try_fetch(&self, tracking_numbers: &[String]) -> Result<Vec<PodRecord>> {
        let request = PodRequest {
            file_type: &self.config.file_type,
            tracking_numbers,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api(format!("status {}", response.status())));
        }

        let body: PodResponse = response.json().await?;
        if !body.success {
            return Err(Error::Api(
                "response did not indicate success".to_string(),
            ));
        }

        Ok(body.payload)
    }
}
