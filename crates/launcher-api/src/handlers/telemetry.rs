//! Append-only telemetry logs: `POST /api/stats` and `POST /api/feedback`.
//!
//! Each append reads the whole log, pushes one record and rewrites the file.
//! The per-log lock in [`LogLocks`](super::LogLocks) serializes that sequence
//! within this process.

use super::AppState;
use crate::domain::error::{ApiError, TelemetryError};
use crate::domain::types::{
    FeedbackLog, FeedbackRecord, FeedbackRequest, StatsLog, StatsRecord, StatsRequest,
    SuccessResponse,
};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use launcher_envelope::now_iso8601;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error};

pub const STATS_FILE: &str = "stats.json";
pub const FEEDBACK_FILE: &str = "feedback.json";

/// Parse a request body that must be a JSON object.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, TelemetryError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => {
            serde_json::from_value(value).map_err(|_| TelemetryError::InvalidBody)
        }
        _ => Err(TelemetryError::InvalidBody),
    }
}

/// Load a log, or its empty form if the file does not exist yet.
async fn read_log<L: DeserializeOwned + Default>(path: &Path) -> Result<L, TelemetryError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(L::default()),
        Err(source) => {
            return Err(TelemetryError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_slice(&bytes).map_err(|source| TelemetryError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrite the whole log through a temp file and rename. On failure the temp
/// file is removed and the existing log is untouched.
async fn write_log<L: Serialize>(path: &Path, log: &L) -> Result<(), TelemetryError> {
    let bytes = serde_json::to_vec_pretty(log).map_err(TelemetryError::Serialize)?;
    let temp_path = path.with_extension("json.tmp");

    if let Err(source) = replace_file(&temp_path, path, &bytes).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(TelemetryError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

async fn replace_file(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(temp_path, bytes).await?;
    tokio::fs::rename(temp_path, path).await
}

async fn ensure_logs_dir(state: &AppState) -> Result<(), TelemetryError> {
    let dir = state.config.storage.logs_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| TelemetryError::CreateDir { path: dir, source })
}

fn to_value<T: Serialize>(record: &T) -> Result<Value, TelemetryError> {
    serde_json::to_value(record).map_err(TelemetryError::Serialize)
}

/// Append one launch to `logs/stats.json`.
pub async fn append_stats(state: &AppState, request: StatsRequest) -> Result<(), TelemetryError> {
    let record = to_value(&StatsRecord::new(now_iso8601(), request))?;
    let path = state.config.storage.log_file(STATS_FILE);

    let _guard = state.logs.stats.lock().await;
    ensure_logs_dir(state).await?;
    let mut log: StatsLog = read_log(&path).await?;
    log.launches.push(record);
    write_log(&path, &log).await?;

    debug!(launches = log.launches.len(), "recorded launch");
    Ok(())
}

/// Append one entry to `logs/feedback.json`.
pub async fn append_feedback(
    state: &AppState,
    request: FeedbackRequest,
) -> Result<(), TelemetryError> {
    let record = to_value(&FeedbackRecord::new(now_iso8601(), request))?;
    let path = state.config.storage.log_file(FEEDBACK_FILE);

    let _guard = state.logs.feedback.lock().await;
    ensure_logs_dir(state).await?;
    let mut log: FeedbackLog = read_log(&path).await?;
    log.push(record);
    write_log(&path, &log).await?;

    debug!(entries = log.len(), "recorded feedback");
    Ok(())
}

fn respond(result: Result<(), TelemetryError>, what: &str, message: &str) -> Response {
    match result {
        Ok(()) => Json(SuccessResponse::ok()).into_response(),
        Err(e) => {
            error!(error = %e, "failed to record {what}");
            ApiError::internal(message).into_response()
        }
    }
}

/// `POST /api/stats`
pub async fn record_stats(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match parse_object::<StatsRequest>(&body) {
        Ok(request) => append_stats(&state, request).await,
        Err(e) => Err(e),
    };
    respond(result, "stats", "Stats error")
}

/// `POST /api/feedback`
pub async fn record_feedback(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match parse_object::<FeedbackRequest>(&body) {
        Ok(request) => append_feedback(&state, request).await,
        Err(e) => Err(e),
    };
    respond(result, "feedback", "Feedback error")
}
