//! Shared data models for the Img2Vid client.
//!
//! This crate provides Serde-serializable types for:
//! - Prepared (transport-encoded) input images
//! - Remote inference jobs and their handles
//! - Progress events and state
//! - Generated video results
//! - User-facing fault categories

pub mod fault;
pub mod image;
pub mod job;
pub mod progress;
pub mod session;
pub mod video;

// Re-export common types
pub use fault::FaultKind;
pub use image::{ImageEncoding, PreparedImage};
pub use job::{InferenceJob, JobHandle, JobState};
pub use progress::{ProgressEvent, ProgressState, IN_PROGRESS_TEXT, PROGRESS_CEILING, SLOW_PROGRESS_TEXT};
pub use session::SessionId;
pub use video::VideoResult;
