//! Error types.
//!
//! Each operation has its own error enum so every failure path is mapped to a
//! response deliberately:
//!
//! | Operation | Error | Response |
//! |-----------|-------|----------|
//! | resource read | [`ResourceError`] | per-resource fallback (unsigned) |
//! | download | [`DownloadError`] | 404 `{"error": "<Kind> not found"}` |
//! | update check | [`UpdateCheckError`] | `{"update_available": false}` |
//! | log append | [`TelemetryError`] | 500 `{"error": "<Log> error"}` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use launcher_envelope::EnvelopeError;
use std::fmt;
use std::path::PathBuf;

/// HTTP error with a JSON `{"error": message}` body.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// Value of the `error` field
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// JSON body
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.message })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

/// Result type for handler-level operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure loading a JSON source file.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// File does not exist
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    /// File exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON
    #[error("malformed JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ResourceError {
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ResourceError::NotFound(path)
        } else {
            ResourceError::Io { path, source }
        }
    }
}

/// Failure resolving a downloadable file.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Identifier would leave the download directory
    #[error("rejected identifier {0:?}")]
    InvalidIdentifier(String),

    /// No regular file at the resolved path
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    /// File exists but could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure during an update check. Never surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum UpdateCheckError {
    /// Update descriptor could not be loaded
    #[error(transparent)]
    Descriptor(#[from] ResourceError),

    /// Descriptor is JSON but not the expected shape
    #[error("invalid update descriptor: {0}")]
    InvalidDescriptor(#[source] serde_json::Error),
}

/// Failure appending to a telemetry log.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Request body is not a JSON object
    #[error("request body is not a JSON object")]
    InvalidBody,

    /// Log directory could not be created
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Existing log could not be read or written
    #[error("log I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Existing log is not the expected JSON container
    #[error("corrupt log {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Updated log could not be serialized
    #[error("failed to serialize log: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failure producing a signed response.
#[derive(Debug, thiserror::Error)]
#[error("signing failed: {0}")]
pub struct SigningError(#[from] pub EnvelopeError);

/// Service-level errors (startup and serving, not per request)
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(#[source] std::io::Error),

    /// Server loop failed
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
