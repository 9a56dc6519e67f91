//! Core data types for the POD fetch pipeline

use serde::{Deserialize, Serialize};

/// A proof-of-delivery record returned by the tracking API
///
/// Only `trackingNumber` and `fileUrl` are interpreted by the pipeline. Any
/// other fields the API returns are captured in `extra` and passed through to
/// the report unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PodRecord {
    /// Tracking number this record belongs to
    #[serde(rename = "trackingNumber")]
    pub tracking_number: String,

    /// URL of the POD image or document
    #[serde(rename = "fileUrl")]
    pub file_url: String,

    /// Additional fields returned by the API, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PodRecord {
    /// Build a record with just the two interpreted fields
    pub fn new(tracking_number: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            file_url: file_url.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Request body for one batch call to the tracking API
#[derive(Debug, Serialize)]
pub struct PodRequest<'a> {
    /// File type filter; the tool always sends an empty string
    #[serde(rename = "fileType")]
    pub file_type: &'a str,

    /// The batch of tracking numbers to look up
    #[serde(rename = "trackingNumbers")]
    pub tracking_numbers: &'a [String],
}

/// Response envelope from the tracking API
///
/// A missing `success` flag counts as failure, and a missing `payload`
/// as an empty record list.
#[derive(Debug, Deserialize)]
pub struct PodResponse {
    /// Application-level success flag
    #[serde(default)]
    pub success: bool,

    /// POD records for the requested batch
    #[serde(default)]
    pub payload: Vec<PodRecord>,
}

/// Outcome of a single file download
///
/// Failures never propagate past the fetcher; the pipeline observes outcomes
/// only to count saved files, never for control flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was written to its destination path
    Saved,
    /// The download failed and no file was written
    Failed,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_deserializes_api_field_names() {
        let record: PodRecord = serde_json::from_value(json!({
            "trackingNumber": "SPX100001",
            "fileUrl": "https://cdn.example.com/pods/SPX100001.jpg"
        }))
        .unwrap();

        assert_eq!(record.tracking_number, "SPX100001");
        assert_eq!(record.file_url, "https://cdn.example.com/pods/SPX100001.jpg");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn unknown_fields_are_preserved_in_extra() {
        let record: PodRecord = serde_json::from_value(json!({
            "trackingNumber": "SPX100001",
            "fileUrl": "https://cdn.example.com/a.jpg",
            "signedBy": "J. Doe",
            "deliveredAt": "2024-03-01T10:15:00Z",
            "attempts": 2
        }))
        .unwrap();

        assert_eq!(record.extra["signedBy"], "J. Doe");
        assert_eq!(record.extra["deliveredAt"], "2024-03-01T10:15:00Z");
        assert_eq!(record.extra["attempts"], 2);
    }

    #[test]
    fn record_round_trips_with_extra_fields() {
        let original: PodRecord = serde_json::from_value(json!({
            "trackingNumber": "SPX1",
            "fileUrl": "http://x/a.png",
            "carrier": "speedx"
        }))
        .unwrap();

        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(json["trackingNumber"], "SPX1");
        assert_eq!(json["carrier"], "speedx");

        let back: PodRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn request_serializes_api_field_names() {
        let batch = vec!["A".to_string(), "B".to_string()];
        let request = PodRequest {
            file_type: "",
            tracking_numbers: &batch,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json, json!({"fileType": "", "trackingNumbers": ["A", "B"]}));
    }

    #[test]
    fn missing_success_flag_counts_as_failure() {
        let response: PodResponse = serde_json::from_value(json!({
            "payload": [{"trackingNumber": "A", "fileUrl": "http://x/a"}]
        }))
        .unwrap();

        assert!(!response.success);
        assert_eq!(response.payload.len(), 1);
    }

    #[test]
    fn missing_payload_is_empty() {
        let response: PodResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(response.success);
        assert!(response.payload.is_empty());
    }
}
