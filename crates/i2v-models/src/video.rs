//! Generated video results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw video content produced by one completed inference job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    /// Submission index of the job that produced this video
    pub index: usize,
    /// Response identifier of the job
    pub response_id: String,
    /// Video bytes
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// When the result was retrieved
    pub completed_at: DateTime<Utc>,
}

impl VideoResult {
    pub fn new(index: usize, response_id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            index,
            response_id: response_id.into(),
            bytes,
            completed_at: Utc::now(),
        }
    }

    /// Suggested file name for the video.
    pub fn file_name(&self) -> String {
        format!("video_{}.mp4", self.index)
    }
}
