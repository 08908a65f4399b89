//! Pipeline Error Types with Error Codes
//!
//! Error code ranges:
//! - PIPE-000-009: Request payload errors
//! - PIPE-010-019: Detection errors (deadline, aborted worker)
//! - PIPE-020-029: Startup errors (config, bind)
//! - PIPE-090-099: IO/JSON errors (CLI)
//!
//! A detected cycle is NOT an error: it is reported as `is_dag: false`.

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// `Retry-After` sent with recoverable failures
const RETRY_AFTER_SECS: &str = "1";

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum PipelineError {
    // ═══════════════════════════════════════════
    // PAYLOAD ERRORS (000-009)
    // ═══════════════════════════════════════════
    #[error("[PIPE-001] Invalid pipeline payload: {details}")]
    InvalidPayload { details: String },

    #[error("[PIPE-002] Unsupported media type: {details}")]
    UnsupportedMediaType { details: String },

    #[error("[PIPE-003] Payload too large: {details}")]
    PayloadTooLarge { details: String },

    // ═══════════════════════════════════════════
    // DETECTION ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[PIPE-010] Cycle detection exceeded the {timeout_ms}ms deadline")]
    DetectionTimeout { timeout_ms: u64 },

    #[error("[PIPE-011] Cycle detection aborted: {reason}")]
    DetectionAborted { reason: String },

    // ═══════════════════════════════════════════
    // STARTUP ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[PIPE-020] Configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("[PIPE-021] Failed to bind {addr}: {reason}")]
    BindError { addr: String, reason: String },

    // ═══════════════════════════════════════════
    // IO/JSON ERRORS (090-099)
    // ═══════════════════════════════════════════
    #[error("[PIPE-090] IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("[PIPE-091] JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PipelineError {
    /// Get the error code (e.g., "PIPE-001")
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPayload { .. } => "PIPE-001",
            Self::UnsupportedMediaType { .. } => "PIPE-002",
            Self::PayloadTooLarge { .. } => "PIPE-003",
            Self::DetectionTimeout { .. } => "PIPE-010",
            Self::DetectionAborted { .. } => "PIPE-011",
            Self::ConfigError { .. } => "PIPE-020",
            Self::BindError { .. } => "PIPE-021",
            Self::IoError(_) => "PIPE-090",
            Self::JsonError(_) => "PIPE-091",
        }
    }

    /// HTTP status reported when the error reaches a client
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload { .. } | Self::JsonError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::DetectionTimeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::DetectionAborted { .. }
            | Self::ConfigError { .. }
            | Self::BindError { .. }
            | Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if the client can send the same request again and expect success
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DetectionTimeout { .. } | Self::DetectionAborted { .. }
        )
    }
}

impl FixSuggestion for PipelineError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            PipelineError::InvalidPayload { .. } => {
                Some("Send {\"nodes\": [{\"id\": ...}], \"edges\": [{\"source\": ..., \"target\": ...}]}")
            }
            PipelineError::UnsupportedMediaType { .. } => {
                Some("Set the header 'Content-Type: application/json'")
            }
            PipelineError::PayloadTooLarge { .. } => {
                Some("Raise max_body_bytes in the server config or send a smaller pipeline")
            }
            PipelineError::DetectionTimeout { .. } => {
                Some("Raise request_timeout_ms in the server config")
            }
            PipelineError::DetectionAborted { .. } => Some("Retry the request"),
            PipelineError::ConfigError { .. } => {
                Some("Check the config file is valid TOML and PIPELINE_* env vars are well-formed")
            }
            PipelineError::BindError { .. } => {
                Some("Pick a free port with --port or PIPELINE_PORT")
            }
            PipelineError::IoError(_) => Some("Check file path and permissions"),
            PipelineError::JsonError(_) => Some("Check the file is valid pipeline JSON"),
        }
    }
}

impl From<JsonRejection> for PipelineError {
    fn from(rejection: JsonRejection) -> Self {
        let details = rejection.body_text();
        match rejection.status() {
            StatusCode::UNSUPPORTED_MEDIA_TYPE => Self::UnsupportedMediaType { details },
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge { details },
            _ => Self::InvalidPayload { details },
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }

        let body = Json(json!({
            "detail": self.to_string(),
            "code": self.code(),
        }));
        let mut response = (status, body).into_response();
        if self.is_recoverable() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_payload_code_and_display() {
        let err = PipelineError::InvalidPayload {
            details: "missing field `edges`".to_string(),
        };
        assert_eq!(err.code(), "PIPE-001");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let msg = err.to_string();
        assert!(msg.contains("[PIPE-001]"));
        assert!(msg.contains("missing field"));
    }

    #[test]
    fn test_timeout_is_recoverable() {
        let err = PipelineError::DetectionTimeout { timeout_ms: 250 };
        assert_eq!(err.code(), "PIPE-010");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("250ms"));
    }

    #[test]
    fn test_recoverable_response_has_retry_after() {
        let response = PipelineError::DetectionTimeout { timeout_ms: 250 }.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "1");

        let response = PipelineError::InvalidPayload {
            details: "missing field `nodes`".to_string(),
        }
        .into_response();
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[test]
    fn test_config_error_is_not_recoverable() {
        let err = PipelineError::ConfigError {
            reason: "bad port".to_string(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "pipeline.json");
        let err: PipelineError = io.into();
        assert_eq!(err.code(), "PIPE-090");
        assert!(err.to_string().contains("pipeline.json"));
    }

    #[test]
    fn test_every_error_has_fix_suggestion() {
        let errors = vec![
            PipelineError::InvalidPayload { details: String::new() },
            PipelineError::UnsupportedMediaType { details: String::new() },
            PipelineError::PayloadTooLarge { details: String::new() },
            PipelineError::DetectionTimeout { timeout_ms: 1 },
            PipelineError::DetectionAborted { reason: String::new() },
            PipelineError::ConfigError { reason: String::new() },
            PipelineError::BindError {
                addr: "127.0.0.1:8000".to_string(),
                reason: String::new(),
            },
        ];
        for err in errors {
            assert!(err.fix_suggestion().is_some(), "{} has no suggestion", err.code());
        }
    }
}
