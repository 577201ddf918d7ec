//! Worker error types.

use i2v_client::InferenceError;
use i2v_media::MediaError;
use i2v_models::FaultKind;
use thiserror::Error;

pub type GenerationResult<T> = Result<T, GenerationError>;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Job {index} produced an empty video")]
    EmptyOutput { index: usize },
}

impl GenerationError {
    /// Category shown to the user for this error.
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            GenerationError::Inference(e) => e.fault_kind(),
            GenerationError::Media(_) | GenerationError::EmptyOutput { .. } => FaultKind::Unexpected,
        }
    }
}
