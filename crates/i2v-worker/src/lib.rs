//! Image-to-video generation worker.
//!
//! This crate provides:
//! - Fan-out of N inference jobs from one prepared image
//! - Polling with aggregate progress reporting
//! - In-order, incremental delivery of finished videos
//! - The invocation boundary that turns faults into one user message

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod presenter;
pub mod progress;
pub mod session;

pub use config::GeneratorConfig;
pub use error::{GenerationError, GenerationResult};
pub use generator::Generator;
pub use logging::{init_tracing, JobLogger};
pub use presenter::FilePresenter;
pub use progress::{ProgressReceiver, ProgressSender, ProgressTracker};
pub use session::{run, Presenter, SessionOutcome};
