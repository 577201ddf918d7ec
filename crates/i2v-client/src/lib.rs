//! Client for the remote image-to-video inference service.
//!
//! The service is asynchronous: a submission returns a handle right away,
//! the handle is polled until the job completes, and the completed response
//! carries a reference to the generated video.

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod service;
pub mod types;

pub use client::InferenceClient;
pub use config::InferenceConfig;
pub use error::{InferenceError, InferenceResult};
pub use service::InferenceService;
pub use types::{InferRequest, OutputRef, PollResponse, PollStatus};
