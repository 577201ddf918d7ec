//! Structured logging utilities.
//!
//! Provides subscriber setup for the binary and a per-job logger with
//! consistent fields for the fan-out and polling loop.

use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use i2v_models::JobHandle;

/// Initialize tracing with colored output for dev, JSON for production.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("i2v=info".parse().unwrap())
        .add_directive("img2vid=info".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Logger for the lifecycle of one inference job.
#[derive(Debug, Clone)]
pub struct JobLogger {
    index: usize,
    response_id: String,
}

impl JobLogger {
    /// Create a logger for the job at `index` in submission order.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            response_id: String::new(),
        }
    }

    /// Create a logger for an already submitted job.
    pub fn for_job(index: usize, handle: &JobHandle) -> Self {
        Self {
            index,
            response_id: handle.response_id.clone(),
        }
    }

    pub fn log_submitted(&self, handle: &JobHandle) {
        info!(
            job_index = self.index,
            response_id = %handle.response_id,
            "Job submitted"
        );
    }

    pub fn log_ready(&self, checks: u32) {
        debug!(
            job_index = self.index,
            response_id = %self.response_id,
            checks,
            "Job ready"
        );
    }

    pub fn log_retrieved(&self, bytes: usize) {
        info!(
            job_index = self.index,
            response_id = %self.response_id,
            bytes,
            "Job result retrieved"
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            job_index = self.index,
            response_id = %self.response_id,
            "Job error: {}", message
        );
    }
}
