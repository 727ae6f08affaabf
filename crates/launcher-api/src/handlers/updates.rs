//! `POST /api/check_update`
//!
//! Versions are compared as plain strings: a client on 10.0.0 is offered
//! 2.0.0, because `"2.0.0" > "10.0.0"`.

use super::resources::load_json;
use super::AppState;
use crate::domain::error::UpdateCheckError;
use crate::domain::types::{UpdateCheckRequest, UpdateCheckResponse, UpdateDescriptor};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Descriptor file under the base directory.
pub const UPDATES_FILE: &str = "updates.json";

/// Byte-wise lexicographic comparison.
pub fn is_newer_lexicographic(latest: &str, client: &str) -> bool {
    latest > client
}

/// Decide whether `request` should be offered an update.
pub async fn check(
    descriptor_path: &Path,
    request: &UpdateCheckRequest,
) -> Result<UpdateCheckResponse, UpdateCheckError> {
    let raw = load_json(descriptor_path).await?;
    let descriptor: UpdateDescriptor =
        serde_json::from_value(raw).map_err(UpdateCheckError::InvalidDescriptor)?;

    let (Some(latest), Some(client)) = (descriptor.latest_version, request.client_version())
    else {
        return Ok(UpdateCheckResponse::none());
    };

    if is_newer_lexicographic(&latest, client) {
        Ok(UpdateCheckResponse::available(latest, descriptor.changelog))
    } else {
        Ok(UpdateCheckResponse::none())
    }
}

/// `POST /api/check_update`
///
/// The body is parsed leniently: an empty or non-JSON body counts as `{}`.
/// The answer is plain JSON, not an envelope.
pub async fn check_update(State(state): State<AppState>, body: Bytes) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let request = UpdateCheckRequest::from_body(&body);
    let path = state.config.storage.source_file(UPDATES_FILE);

    let response = check(&path, &request).await.unwrap_or_else(|e| {
        debug!(error = %e, "update check failed, reporting no update");
        UpdateCheckResponse::none()
    });
    Json(response).into_response()
}
