//! Client configuration
//!
//! Endpoint, transport timeouts and retry behavior shared by a dispatcher and
//! its drain worker. Values can be set in code, read from the environment, or
//! deserialized from an application's own config file.

use super::error::{RemoteLogError, Result};
use super::retry_policy::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default logging endpoint
pub const DEFAULT_ENDPOINT: &str = "https://log.remotelog.io/api/v1/log";

/// Default TCP connect timeout (5 seconds)
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default overall request timeout (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_WORKER_THREAD_NAME: &str = "remote-log-drain";

pub const ENV_ENDPOINT: &str = "REMOTE_LOG_ENDPOINT";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "REMOTE_LOG_CONNECT_TIMEOUT_MS";
pub const ENV_TIMEOUT_MS: &str = "REMOTE_LOG_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    #[serde(with = "duration_ms")]
    pub connect_timeout: Duration,
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub worker_thread_name: String,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            worker_thread_name: DEFAULT_WORKER_THREAD_NAME.to_string(),
        }
    }

    /// Build a configuration from `REMOTE_LOG_*` environment variables,
    /// falling back to defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a timeout variable is not a number of
    /// milliseconds, or if the resulting configuration fails [`validate`].
    ///
    /// [`validate`]: ClientConfig::validate
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(timeout) = env_millis(ENV_CONNECT_TIMEOUT_MS)? {
            config.connect_timeout = timeout;
        }
        if let Some(timeout) = env_millis(ENV_TIMEOUT_MS)? {
            config.timeout = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_worker_thread_name(mut self, name: impl Into<String>) -> Self {
        self.worker_thread_name = name.into();
        self
    }

    /// Check the configuration before it is used to build a transport.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(RemoteLogError::config("ClientConfig", "endpoint is empty"));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(RemoteLogError::config(
                "ClientConfig",
                format!("endpoint '{}' must be an http:// or https:// URL", endpoint),
            ));
        }
        if self.connect_timeout.is_zero() || self.timeout.is_zero() {
            return Err(RemoteLogError::config(
                "ClientConfig",
                "timeouts must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_millis(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|e| {
                RemoteLogError::config("ClientConfig", format!("{} = '{}': {}", name, raw, e))
            }),
        Err(_) => Ok(None),
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
