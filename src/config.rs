//! # Engine configuration
//!
//! [`EngineConfig`] gathers the tunable parameters of the simulation engine:
//!
//! - `endpoint`: URL of the remote estimation service,
//! - `timeout`: how long a delegation may take before it counts as failed,
//! - `segment_count`: resolution of the trajectory generated for each settled run.
//!
//! The configuration is built either with [`EngineConfig::builder`] or from a TOML file
//! ([`EngineConfig::from_file`]). Every key of the file is optional:
//!
//! ```toml
//! endpoint = "http://127.0.0.1:8000/api/simulate"
//! timeout_secs = 10
//! segment_count = 64
//! ```
//!
//! ## Example
//!
//! ```rust
//! use intercept::config::EngineConfig;
//!
//! let config = EngineConfig::builder()
//!     .endpoint("http://localhost:9000/simulate")
//!     .timeout_secs(5)
//!     .segment_count(128)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.segment_count().get(), 128);
//! ```
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::intercept_errors::InterceptError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/simulate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SEGMENT_COUNT: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    endpoint: Url,
    timeout: Duration,
    segment_count: NonZeroUsize,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn segment_count(&self) -> NonZeroUsize {
        self.segment_count
    }

    /// Parse a configuration from TOML text. Missing keys keep their default value.
    pub fn from_toml_str(contents: &str) -> Result<Self, InterceptError> {
        let file: EngineConfigFile = toml::from_str(contents)?;

        let mut builder = EngineConfig::builder();
        if let Some(endpoint) = file.endpoint {
            builder = builder.endpoint(endpoint);
        }
        if let Some(timeout_secs) = file.timeout_secs {
            builder = builder.timeout_secs(timeout_secs);
        }
        if let Some(segment_count) = file.segment_count {
            builder = builder.segment_count(segment_count);
        }
        builder.build()
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InterceptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            segment_count: NonZeroUsize::new(DEFAULT_SEGMENT_COUNT)
                .expect("default segment count is non-zero"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineConfigFile {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    segment_count: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    endpoint: String,
    timeout: Duration,
    segment_count: usize,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfigBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            segment_count: DEFAULT_SEGMENT_COUNT,
        }
    }

    pub fn endpoint(mut self, v: impl Into<String>) -> Self {
        self.endpoint = v.into();
        self
    }
    pub fn timeout(mut self, v: Duration) -> Self {
        self.timeout = v;
        self
    }
    pub fn timeout_secs(mut self, v: u64) -> Self {
        self.timeout = Duration::from_secs(v);
        self
    }
    pub fn segment_count(mut self, v: usize) -> Self {
        self.segment_count = v;
        self
    }

    /// Validate and build the configuration.
    ///
    /// Return
    /// ------
    /// * [`InterceptError::InvalidUrl`] if the endpoint is not an absolute http(s) URL
    /// * [`InterceptError::InvalidConfig`] if the timeout or the segment count is zero
    pub fn build(self) -> Result<EngineConfig, InterceptError> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|err| InterceptError::InvalidUrl(format!("{} ({err})", self.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(InterceptError::InvalidUrl(format!(
                "{} (scheme must be http or https)",
                self.endpoint
            )));
        }

        if self.timeout.is_zero() {
            return Err(InterceptError::InvalidConfig(
                "timeout must be strictly positive".into(),
            ));
        }

        let segment_count = NonZeroUsize::new(self.segment_count).ok_or_else(|| {
            InterceptError::InvalidConfig("segment_count must be at least 1".into())
        })?;

        Ok(EngineConfig {
            endpoint,
            timeout: self.timeout,
            segment_count,
        })
    }
}
