//! Inference service request/response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use i2v_models::PreparedImage;

use crate::error::{InferenceError, InferenceResult};

/// Request body for a job submission.
#[derive(Debug, Clone, Serialize)]
pub struct InferRequest<'a> {
    pub input: InferInput<'a>,
}

/// Inputs of a job submission.
#[derive(Debug, Clone, Serialize)]
pub struct InferInput<'a> {
    /// Base64 PNG of the source image
    pub image: &'a str,
}

impl<'a> InferRequest<'a> {
    pub fn new(image: &'a PreparedImage) -> Self {
        Self {
            input: InferInput {
                image: image.data(),
            },
        }
    }
}

/// Status reported by the service for a queued job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    Pending,
    Running,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Response from the poll URL of a job.
#[derive(Debug, Clone, Deserialize)]
pub struct PollResponse {
    pub status: PollStatus,
    /// Where the full result can be fetched, once completed
    #[serde(default)]
    pub response_url: Option<String>,
    /// Failure description, when status is `failed`
    #[serde(default)]
    pub error: Option<String>,
}

/// Reference to binary output inside a result body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRef {
    /// Content must be downloaded from this URL
    Url(String),
    /// Content is inlined as base64
    Base64(String),
}

impl OutputRef {
    /// Field carrying the generated video in a result body.
    pub const DEFAULT_KEY: &'static str = "output";

    /// Extract the output reference stored under `key`.
    pub fn from_response(body: &Value, key: &str) -> InferenceResult<Self> {
        let value = body
            .get(key)
            .ok_or_else(|| InferenceError::invalid_response(format!("missing '{}' field", key)))?;
        Self::from_value(value)
            .ok_or_else(|| InferenceError::invalid_response(format!("'{}' holds no video reference", key)))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::from_text(s),
            Value::Object(map) => {
                if let Some(Value::String(url)) = map.get("url") {
                    return Self::from_text(url);
                }
                ["data", "video"]
                    .iter()
                    .find_map(|key| map.get(*key))
                    .and_then(Self::from_value)
            }
            _ => None,
        }
    }

    fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text.starts_with("http://") || text.starts_with("https://") {
            return Some(Self::Url(text.to_string()));
        }
        // Strip a data URI prefix such as "data:video/mp4;base64,"
        let payload = match text.strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map(|(_, data)| data)?,
            None => text,
        };
        Some(Self::Base64(payload.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use i2v_models::ImageEncoding;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let image = PreparedImage::new("iVBORw0KGgo=", ImageEncoding::Base64Png, 1, 1);
        let body = serde_json::to_value(InferRequest::new(&image)).unwrap();

        assert_eq!(body, json!({"input": {"image": "iVBORw0KGgo="}}));
    }

    #[test]
    fn test_poll_response_parsing() {
        let poll: PollResponse = serde_json::from_value(json!({
            "status": "completed",
            "response_url": "https://svc/response/1"
        }))
        .unwrap();
        assert_eq!(poll.status, PollStatus::Completed);
        assert_eq!(poll.response_url.as_deref(), Some("https://svc/response/1"));

        let poll: PollResponse = serde_json::from_value(json!({"status": "enqueued"})).unwrap();
        assert_eq!(poll.status, PollStatus::Unknown);
        assert!(poll.error.is_none());
    }

    #[test]
    fn test_output_ref_variants() {
        assert_eq!(
            OutputRef::from_response(&json!({"output": "https://cdn/v.mp4"}), "output").unwrap(),
            OutputRef::Url("https://cdn/v.mp4".into())
        );
        assert_eq!(
            OutputRef::from_response(&json!({"output": "AAAA"}), "output").unwrap(),
            OutputRef::Base64("AAAA".into())
        );
        assert_eq!(
            OutputRef::from_response(&json!({"output": {"url": "https://cdn/v.mp4"}}), "output")
                .unwrap(),
            OutputRef::Url("https://cdn/v.mp4".into())
        );
        assert_eq!(
            OutputRef::from_response(&json!({"output": {"data": "AAAA"}}), "output").unwrap(),
            OutputRef::Base64("AAAA".into())
        );
        assert_eq!(
            OutputRef::from_response(&json!({"output": {"video": "data:video/mp4;base64,AAAA"}}), "output")
                .unwrap(),
            OutputRef::Base64("AAAA".into())
        );
    }

    #[test]
    fn test_output_ref_missing_or_empty() {
        assert!(matches!(
            OutputRef::from_response(&json!({"result": "AAAA"}), "output"),
            Err(InferenceError::InvalidResponse(_))
        ));
        assert!(matches!(
            OutputRef::from_response(&json!({"output": 42}), "output"),
            Err(InferenceError::InvalidResponse(_))
        ));
        assert!(matches!(
            OutputRef::from_response(&json!({"output": ""}), "output"),
            Err(InferenceError::InvalidResponse(_))
        ));
    }
}
