//! Signed JSON resources: `/api/{config,news,versions,mods,builds}`.
//!
//! A file that is missing, unreadable or malformed is never an error to the
//! client; the resource's unsigned fallback is returned instead.

use super::AppState;
use crate::domain::error::{ApiError, ResourceError, SigningError};
use crate::domain::resources::Resource;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use launcher_envelope::Envelope;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error, warn};

/// Read and parse a JSON file.
pub async fn load_json(path: &Path) -> Result<Value, ResourceError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ResourceError::from_io(path.to_path_buf(), e))?;
    serde_json::from_slice(&bytes).map_err(|source| ResourceError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Sign `payload`, answering 500 if that fails.
pub fn signed_json<T: Serialize + ?Sized>(state: &AppState, payload: &T) -> Response {
    match sign(state, payload) {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => {
            error!(error = %e, "failed to sign response");
            ApiError::internal("Signing error").into_response()
        }
    }
}

fn sign<T: Serialize + ?Sized>(state: &AppState, payload: &T) -> Result<Envelope, SigningError> {
    Ok(state.signer.sign(payload)?)
}

async fn serve_resource(state: &AppState, resource: Resource) -> Response {
    let path = state.config.storage.source_file(resource.file_name());
    match load_json(&path).await {
        Ok(value) => signed_json(state, &value),
        Err(e) => {
            match &e {
                ResourceError::NotFound(_) => debug!(resource = resource.name(), "{e}"),
                _ => warn!(resource = resource.name(), error = %e, "serving fallback"),
            }
            let (status, body) = resource.fallback();
            (status, Json(body)).into_response()
        }
    }
}

/// `GET /api/config`
pub async fn get_config(State(state): State<AppState>) -> Response {
    serve_resource(&state, Resource::Config).await
}

/// `GET /api/news`
pub async fn get_news(State(state): State<AppState>) -> Response {
    serve_resource(&state, Resource::News).await
}

/// `GET /api/versions`
pub async fn get_versions(State(state): State<AppState>) -> Response {
    serve_resource(&state, Resource::Versions).await
}

/// `GET /api/mods`
pub async fn get_mods(State(state): State<AppState>) -> Response {
    serve_resource(&state, Resource::Mods).await
}

/// `GET /api/builds`
pub async fn get_builds(State(state): State<AppState>) -> Response {
    serve_resource(&state, Resource::Builds).await
}
