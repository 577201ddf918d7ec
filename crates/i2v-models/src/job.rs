//! Remote inference job definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle returned by the inference service when a job is queued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle {
    /// Server-assigned identifier for the queued request
    pub response_id: String,
    /// URL to query for the job status
    pub poll_url: String,
}

impl JobHandle {
    pub fn new(response_id: impl Into<String>, poll_url: impl Into<String>) -> Self {
        Self {
            response_id: response_id.into(),
            poll_url: poll_url.into(),
        }
    }

}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response_id)
    }
}

/// Lifecycle of a submitted job within one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Submitted, the service has not reported completion yet
    #[default]
    Pending,
    /// The service reported completion; result not fetched yet
    Ready,
    /// Result fetched and handed to the caller
    Retrieved,
}


/// One outstanding request to the inference service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceJob {
    /// Position in submission order (0..N-1)
    pub index: usize,
    /// Handle returned on submission
    pub handle: JobHandle,
    /// Current state
    pub state: JobState,
}

impl InferenceJob {
    /// Track a freshly submitted job.
    pub fn new(index: usize, handle: JobHandle) -> Self {
        Self {
            index,
            handle,
            state: JobState::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == JobState::Pending
    }

    pub fn is_ready(&self) -> bool {
        self.state == JobState::Ready
    }

    /// Record that the service reported completion.
    pub fn mark_ready(&mut self) {
        if self.state == JobState::Pending {
            self.state = JobState::Ready;
        }
    }

    /// Record that the result was consumed.
    pub fn mark_retrieved(&mut self) {
        self.state = JobState::Retrieved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_lifecycle() {
        let mut job = InferenceJob::new(0, JobHandle::new("resp-1", "https://svc/poll/resp-1"));
        assert!(job.is_pending());

        job.mark_ready();
        assert!(job.is_ready());

        job.mark_retrieved();
        assert_eq!(job.state, JobState::Retrieved);

        // Readiness never moves a retrieved job backwards
        job.mark_ready();
        assert_eq!(job.state, JobState::Retrieved);
    }

    #[test]
    fn test_handle_deserialize() {
        let json = r#"{"response_id":"abc","poll_url":"https://svc/queue/abc"}"#;
        let handle: JobHandle = serde_json::from_str(json).unwrap();

        assert_eq!(handle.response_id, "abc");
        assert_eq!(handle.poll_url, "https://svc/queue/abc");
        assert_eq!(handle.to_string(), "abc");
    }
}
