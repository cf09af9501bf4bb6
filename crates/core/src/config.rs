//! Startup configuration
//!
//! Everything the binary needs arrives through environment variables, with
//! an optional `.env.local` overlay for development, and is resolved once
//! into an immutable [`ScoutConfig`]. Nothing downstream re-reads the
//! environment; the engine receives plain values and has no dependency on
//! how they were resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::access::AccessMode;
use crate::error::{Error, Result};

/// Deployment environment label
const ENV_ENVIRONMENT: &str = "SCOUT_ENV";
/// Default bucket for commands that do not name one
const ENV_BUCKET: &str = "SCOUT_BUCKET";
/// Store region
const ENV_REGION: &str = "AWS_REGION";
/// Opaque model/runtime identifier for the calling layer
const ENV_MODEL_ID: &str = "SCOUT_MODEL_ID";
/// Custom endpoint for S3-compatible stores
const ENV_ENDPOINT_URL: &str = "SCOUT_ENDPOINT_URL";
/// Opt-in for mutation operations
const ENV_ALLOW_WRITE: &str = "SCOUT_ALLOW_WRITE";

/// Overlay file loaded before resolution; real environment wins
const ENV_FILE: &str = ".env.local";

const DEFAULT_ENVIRONMENT: &str = "local";
const DEFAULT_REGION: &str = "us-west-2";

/// Resolved startup configuration, immutable once built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Deployment environment label (`local`, `staging`, ...)
    pub environment: String,

    /// Default bucket for commands that do not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Store region
    pub region: String,

    /// Model/runtime identifier, carried untouched for the calling layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Custom endpoint URL; set for MinIO/LocalStack style deployments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Whether mutation operations are enabled
    pub access: AccessMode,
}

impl ScoutConfig {
    /// Resolve from the process environment, loading `.env.local` first
    pub fn from_env() -> Result<Self> {
        match dotenvy::from_filename(ENV_FILE) {
            Ok(_) => tracing::debug!(file = ENV_FILE, "loaded environment overlay"),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(Error::Config(format!("{ENV_FILE}: {err}"))),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve from an arbitrary variable lookup
    ///
    /// Tests use this to exercise resolution without touching the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint_url = lookup(ENV_ENDPOINT_URL);
        if let Some(endpoint) = &endpoint_url {
            url::Url::parse(endpoint)
                .map_err(|err| Error::Config(format!("{ENV_ENDPOINT_URL} {endpoint:?}: {err}")))?;
        }

        let access = if lookup(ENV_ALLOW_WRITE).as_deref().is_some_and(truthy) {
            AccessMode::ReadWrite
        } else {
            AccessMode::ReadOnly
        };

        Ok(Self {
            environment: lookup(ENV_ENVIRONMENT)
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            bucket: lookup(ENV_BUCKET),
            region: lookup(ENV_REGION).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            model_id: lookup(ENV_MODEL_ID),
            endpoint_url,
            access,
        })
    }
}

impl fmt::Display for ScoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScoutConfig(env={}, bucket={}, region={}, access={})",
            self.environment,
            self.bucket.as_deref().unwrap_or("unset"),
            self.region,
            self.access,
        )
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Retry tuning for transient transport failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff before the first retry, in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Ceiling for the doubling backoff, in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    10000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
        }
    }
}

/// Timeout bounds applied to every remote call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// Timeout for each individual attempt, in milliseconds
    #[serde(default = "default_attempt_timeout")]
    pub attempt_ms: u64,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_attempt_timeout() -> u64 {
    30000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_timeout(),
            attempt_ms: default_attempt_timeout(),
        }
    }
}
