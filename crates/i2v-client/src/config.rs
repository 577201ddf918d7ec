//! Inference client configuration.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{InferenceError, InferenceResult};

/// Environment variable holding the inference endpoint base URL.
pub const ENDPOINT_URL_ENV: &str = "SVD_ENDPOINT_URL";
/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "OCTOAI_TOKEN";

/// Configuration for the inference client.
///
/// Validated at construction: the endpoint must be an absolute http(s) URL
/// and the token must be non-empty.
#[derive(Clone)]
pub struct InferenceConfig {
    /// Base URL of the inference endpoint
    pub endpoint_url: Url,
    token: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("endpoint_url", &self.endpoint_url.as_str())
            .field("token", &"***")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl InferenceConfig {
    /// Create a validated config with default timeouts.
    pub fn new(endpoint_url: &str, token: impl Into<String>) -> InferenceResult<Self> {
        let endpoint_url = endpoint_url.trim();
        if endpoint_url.is_empty() {
            return Err(InferenceError::config(format!("{} cannot be empty", ENDPOINT_URL_ENV)));
        }

        let endpoint_url = Url::parse(endpoint_url).map_err(|e| {
            InferenceError::config(format!("{} is not a valid URL: {}", ENDPOINT_URL_ENV, e))
        })?;

        if !matches!(endpoint_url.scheme(), "http" | "https") {
            return Err(InferenceError::config(format!(
                "{} must use http or https, got '{}'",
                ENDPOINT_URL_ENV,
                endpoint_url.scheme()
            )));
        }

        let token = token.into();
        if token.trim().is_empty() {
            return Err(InferenceError::config(format!("{} cannot be empty", TOKEN_ENV)));
        }

        Ok(Self {
            endpoint_url,
            token,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        })
    }

    /// Create config from environment variables.
    ///
    /// Both the endpoint and the token are required.
    pub fn from_env() -> InferenceResult<Self> {
        let endpoint_url = std::env::var(ENDPOINT_URL_ENV)
            .map_err(|_| InferenceError::config(format!("{} must be set", ENDPOINT_URL_ENV)))?;
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| InferenceError::config(format!("{} must be set", TOKEN_ENV)))?;

        let mut config = Self::new(&endpoint_url, token)?;

        if let Some(secs) = std::env::var("INFERENCE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = std::env::var("INFERENCE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.connect_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// URL jobs are submitted to.
    pub fn infer_url(&self) -> String {
        format!("{}/infer", self.endpoint_url.as_str().trim_end_matches('/'))
    }
}
