//! The operations the job poller needs from an inference backend.

use async_trait::async_trait;
use serde_json::Value;

use i2v_models::{JobHandle, PreparedImage};

use crate::error::InferenceResult;
use crate::types::OutputRef;

/// Asynchronous image-to-video inference backend.
///
/// Implemented over HTTP by [`crate::InferenceClient`]; tests substitute
/// scripted backends.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Queue a job for the image. Returns without waiting for the result.
    async fn submit(&self, image: &PreparedImage) -> InferenceResult<JobHandle>;

    /// Whether the job has finished. A remotely failed job is an error.
    async fn is_ready(&self, handle: &JobHandle) -> InferenceResult<bool>;

    /// Full result body of a finished job.
    async fn fetch_result(&self, handle: &JobHandle) -> InferenceResult<Value>;

    /// Materialize referenced output into bytes.
    async fn resolve_output(&self, output: &OutputRef) -> InferenceResult<Vec<u8>>;
}
