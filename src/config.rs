//! Server Configuration Module
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags (`--host`, `--port`)
//! 2. Environment variables (`PIPELINE_HOST`, `PIPELINE_PORT`,
//!    `PIPELINE_ALLOWED_ORIGIN`, `PIPELINE_REQUEST_TIMEOUT_MS`,
//!    `PIPELINE_MAX_BODY_BYTES`)
//! 3. Config file (`--config <FILE>`, or `./pipeline-dag.toml` if present)
//! 4. Defaults

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{PipelineError, Result};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pipeline-dag.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
/// The editor's dev server
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
/// Log filter used when `RUST_LOG` is unset, empty or unparsable
pub const DEFAULT_LOG_FILTER: &str = "info";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (hostname or IP)
    pub host: String,

    pub port: u16,

    /// The single front-end origin allowed by CORS
    pub allowed_origin: String,

    /// Deadline for one cycle detection, in milliseconds
    pub request_timeout_ms: u64,

    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file
    ///
    /// An explicit `path` must exist. Without one, `./pipeline-dag.toml` is
    /// read if present, otherwise defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = fs::read_to_string(path).map_err(|e| PipelineError::ConfigError {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PipelineError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over config file values. Empty
    /// variables are ignored; malformed numbers are an error.
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(host) = env_var("PIPELINE_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_env("PIPELINE_PORT")? {
            self.port = port;
        }
        if let Some(origin) = env_var("PIPELINE_ALLOWED_ORIGIN") {
            self.allowed_origin = origin;
        }
        if let Some(timeout) = parse_env("PIPELINE_REQUEST_TIMEOUT_MS")? {
            self.request_timeout_ms = timeout;
        }
        if let Some(limit) = parse_env("PIPELINE_MAX_BODY_BYTES")? {
            self.max_body_bytes = limit;
        }
        Ok(self)
    }

    /// Apply CLI flags on top of everything else
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(PipelineError::ConfigError {
                reason: "host cannot be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(PipelineError::ConfigError {
                reason: "request_timeout_ms must be greater than 0".to_string(),
            });
        }
        if self.max_body_bytes == 0 {
            return Err(PipelineError::ConfigError {
                reason: "max_body_bytes must be greater than 0".to_string(),
            });
        }
        self.origin_header()?;
        Ok(())
    }

    /// `host:port`, resolved by the listener at bind time
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// The allowed origin as a CORS header value
    pub fn origin_header(&self) -> Result<HeaderValue> {
        // Credentialed CORS cannot answer with `*`
        if self.allowed_origin.trim() == "*" {
            return Err(PipelineError::ConfigError {
                reason: "allowed_origin must be a concrete origin, not '*'".to_string(),
            });
        }
        HeaderValue::from_str(&self.allowed_origin).map_err(|e| PipelineError::ConfigError {
            reason: format!("Invalid allowed_origin '{}': {}", self.allowed_origin, e),
        })
    }
}

/// Log filter from `RUST_LOG`-style directives, falling back to
/// [`DEFAULT_LOG_FILTER`].
///
/// The directives replace the default entirely, so `RUST_LOG=debug` shows
/// debug events and `RUST_LOG=warn` hides info ones.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(name)
        .map(|raw| {
            raw.parse().map_err(|e| PipelineError::ConfigError {
                reason: format!("{}='{}': {}", name, raw, e),
            })
        })
        .transpose()
}
