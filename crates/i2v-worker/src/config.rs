//! Generator configuration.

use std::time::Duration;

use i2v_client::OutputRef;

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of videos requested per upload
    pub num_videos: usize,
    /// Delay between readiness checks
    pub poll_interval: Duration,
    /// Result field holding the generated video
    pub output_key: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_videos: 2,
            poll_interval: Duration::from_millis(500),
            output_key: OutputRef::DEFAULT_KEY.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            num_videos: std::env::var("I2V_NUM_VIDEOS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            poll_interval: Duration::from_millis(
                std::env::var("I2V_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(500),
            ),
            output_key: OutputRef::DEFAULT_KEY.to_string(),
        }
    }

    pub fn with_num_videos(mut self, num_videos: usize) -> Self {
        self.num_videos = num_videos;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}
