//! Per-record POD file downloading
//!
//! Each record's file lands in `<output_dir>/<tracking_number>/`. Every
//! failure is absorbed here — one bad file must never abort its batch, so the
//! fetcher reports an outcome instead of an error and leaves nothing behind
//! on failure.

use crate::error::{Error, Result};
use crate::types::{DownloadOutcome, PodRecord};
use std::path::Path;
use std::time::Duration;

/// Filename used when a URL has no usable final path segment
const FALLBACK_FILENAME: &str = "pod.jpg";

/// Downloads POD files referenced by records
#[derive(Clone, Debug)]
pub struct FileFetcher {
    client: reqwest::Client,
}

impl FileFetcher {
    /// Create a fetcher with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Download one POD file into its tracking-number folder
    ///
    /// The destination directory is created first (idempotent, safe under
    /// concurrent workers creating siblings). On success the raw body bytes
    /// are written verbatim, overwriting any existing file at that path.
    /// Any failure — bad URL, non-success status, network or filesystem
    /// error — is logged at debug level and reported as `Failed`; it never
    /// propagates.
    pub async fn fetch_file(&self, record: &PodRecord, output_dir: &Path) -> DownloadOutcome {
        match self.try_fetch(record, output_dir).await {
            Ok(()) => DownloadOutcome::Saved,
            Err(e) => {
                tracing::debug!(
                    tracking_number = %record.tracking_number,
                    url = %record.file_url,
                    error = %e,
                    "POD file download failed"
                );
                DownloadOutcome::Failed
            }
        }
    }

    async fn try_fetch(&self, record: &PodRecord, output_dir: &Path) -> Result<()> {
        let dest_dir = output_dir.join(&record.tracking_number);
        tokio::fs::create_dir_all(&dest_dir).await?;

        let response = self.client.get(&record.file_url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Api(format!("status {}", response.status())));
        }
        let bytes = response.bytes().await?;

        let dest = dest_dir.join(file_name_for(&record.file_url));
        tokio::fs::write(&dest, &bytes).await?;
        Ok(())
    }
}

/// Derive the destination filename from the last path segment of a URL
///
/// The segment is used as-is, extension or not — `http://x/a/b/img` saves as
/// `img`. URLs with no usable segment fall back to a fixed name.
pub fn file_name_for(file_url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(file_url)
        && let Some(mut segments) = parsed.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        return last.to_string();
    }
    FALLBACK_FILENAME.to_string()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> FileFetcher {
        FileFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn file_name_uses_url_basename() {
        assert_eq!(file_name_for("http://cdn.example.com/pods/SPX1.jpg"), "SPX1.jpg");
        assert_eq!(file_name_for("http://x/a/b/c/photo.png"), "photo.png");
    }

    #[test]
    fn file_name_without_extension_is_kept_as_is() {
        // Pinned decision: the basename is used verbatim, no default extension
        assert_eq!(file_name_for("http://x/a/b/img"), "img");
    }

    #[test]
    fn file_name_falls_back_when_url_has_no_segment() {
        assert_eq!(file_name_for("http://example.com/"), FALLBACK_FILENAME);
        assert_eq!(file_name_for("not a url"), FALLBACK_FILENAME);
    }

    #[test]
    fn file_name_ignores_query_string() {
        assert_eq!(
            file_name_for("http://cdn.example.com/pods/SPX1.jpg?token=abc"),
            "SPX1.jpg"
        );
    }

    #[tokio::test]
    async fn successful_download_writes_byte_identical_file() {
        let server = MockServer::start().await;
        let body: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        Mock::given(method("GET"))
            .and(path("/pods/SPX1.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let record = PodRecord::new("SPX1", format!("{}/pods/SPX1.jpg", server.uri()));

        let outcome = fetcher().fetch_file(&record, temp.path()).await;

        assert_eq!(outcome, DownloadOutcome::Saved);
        let saved = std::fs::read(temp.path().join("SPX1").join("SPX1.jpg")).unwrap();
        assert_eq!(saved, body);
    }

    #[tokio::test]
    async fn http_error_leaves_no_file_and_does_not_panic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let record = PodRecord::new("SPX2", format!("{}/pods/SPX2.jpg", server.uri()));

        let outcome = fetcher().fetch_file(&record, temp.path()).await;

        assert_eq!(outcome, DownloadOutcome::Failed);
        assert!(
            !temp.path().join("SPX2").join("SPX2.jpg").exists(),
            "no file is written on failure"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_absorbed() {
        let temp = TempDir::new().unwrap();
        let record = PodRecord::new("SPX3", "http://127.0.0.1:9/pods/SPX3.jpg");

        let fetcher = FileFetcher::new(Duration::from_millis(500)).unwrap();
        let outcome = fetcher.fetch_file(&record, temp.path()).await;

        assert_eq!(outcome, DownloadOutcome::Failed);
    }

    #[tokio::test]
    async fn second_download_overwrites_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pods/SPX4.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first".as_slice()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pods/SPX4.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".as_slice()))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let record = PodRecord::new("SPX4", format!("{}/pods/SPX4.jpg", server.uri()));
        let fetcher = fetcher();

        assert_eq!(fetcher.fetch_file(&record, temp.path()).await, DownloadOutcome::Saved);
        assert_eq!(fetcher.fetch_file(&record, temp.path()).await, DownloadOutcome::Saved);

        let saved = std::fs::read(temp.path().join("SPX4").join("SPX4.jpg")).unwrap();
        assert_eq!(saved, b"second", "overwrite semantics, not append");
    }

    #[tokio::test]
    async fn existing_destination_directory_is_reused() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".as_slice()))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("SPX5")).unwrap();
        let record = PodRecord::new("SPX5", format!("{}/SPX5.jpg", server.uri()));

        let outcome = fetcher().fetch_file(&record, temp.path()).await;

        assert_eq!(outcome, DownloadOutcome::Saved);
        assert!(temp.path().join("SPX5").join("SPX5.jpg").exists());
    }
}
