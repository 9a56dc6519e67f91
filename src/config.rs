//! Configuration types for pod-fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tracking API configuration (endpoint, timeout, retry behavior)
///
/// Groups settings for the batch POD lookup calls.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// POD lookup endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Value sent as `fileType` in each request (default: empty string)
    #[serde(default)]
    pub file_type: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Retry behavior for failed batch calls
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            file_type: String::new(),
            request_timeout: default_request_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration for batch API calls
///
/// The delay is fixed between attempts — no backoff, no jitter. A batch that
/// exhausts its attempts degrades to "no records", it does not fail the run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts per batch, including the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts (default: 2 seconds)
    #[serde(default = "default_retry_delay", with = "duration_serde")]
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Batch and download fan-out configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tracking numbers per API call (default: 10)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Concurrent file downloads per batch (default: 4)
    #[serde(default = "default_download_workers")]
    pub download_workers: usize,

    /// Per-file download timeout (default: 30 seconds)
    #[serde(default = "default_download_timeout", with = "duration_serde")]
    pub download_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            download_workers: default_download_workers(),
            download_timeout: default_download_timeout(),
        }
    }
}

/// Main configuration for the POD fetch pipeline
///
/// Sub-config fields are flattened for serialization, so the JSON format
/// stays flat (no nesting) and every field falls back to its default when
/// absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tracking API settings (endpoint, timeout, retries)
    #[serde(flatten)]
    pub api: ApiConfig,

    /// Batching and download fan-out settings
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.is_empty() {
            return Err(Error::Config {
                message: "API endpoint must not be empty".to_string(),
                key: Some("endpoint".to_string()),
            });
        }
        if self.pipeline.batch_size == 0 {
            return Err(Error::Config {
                message: "batch_size must be at least 1".to_string(),
                key: Some("batch_size".to_string()),
            });
        }
        if self.pipeline.download_workers == 0 {
            return Err(Error::Config {
                message: "download_workers must be at least 1".to_string(),
                key: Some("download_workers".to_string()),
            });
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://trk.speedx.io/tracking-api/pod/listLabelFile".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_batch_size() -> usize {
    10
}

fn default_download_workers() -> usize {
    4
}

fn default_download_timeout() -> Duration {
    Duration::from_secs(30)
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
