//! Static file downloads from `downloads/{mods,builds,updates}`.
//!
//! Identifiers come straight from the URL, so anything that could step out of
//! the kind's directory is refused before touching the filesystem. Refusals
//! look exactly like a missing file.

use super::AppState;
use crate::domain::error::{ApiError, ApiResult, DownloadError};
use crate::domain::resources::DownloadKind;
use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::fmt::Write as _;
use std::path::PathBuf;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// Reject identifiers that are empty, relative segments, or contain a path
/// separator, `..`, or NUL.
pub fn validate_identifier(id: &str) -> Result<(), DownloadError> {
    let rejected = id.is_empty()
        || id == "."
        || id.contains("..")
        || id.contains('/')
        || id.contains('\\')
        || id.contains('\0');
    if rejected {
        return Err(DownloadError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// Map `id` to a file under the kind's download directory.
pub fn resolve(state: &AppState, kind: DownloadKind, id: &str) -> Result<PathBuf, DownloadError> {
    validate_identifier(id)?;
    Ok(state
        .config
        .storage
        .downloads_dir(kind.subdir())
        .join(kind.file_name(id)))
}

async fn open(path: PathBuf) -> Result<(File, u64), DownloadError> {
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(DownloadError::NotFound(path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DownloadError::NotFound(path))
        }
        Err(source) => return Err(DownloadError::Io { path, source }),
    };
    let file = File::open(&path)
        .await
        .map_err(|source| DownloadError::Io { path, source })?;
    Ok((file, metadata.len()))
}

/// `Content-Disposition` value for `file_name`. Non-ASCII names get an
/// ASCII fallback plus an RFC 5987 `filename*`.
pub fn content_disposition(file_name: &str) -> HeaderValue {
    let plain = file_name
        .chars()
        .all(|c| (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ');

    let value = if plain {
        format!("attachment; filename=\"{file_name}\"")
    } else {
        let fallback: String = file_name
            .chars()
            .map(|c| {
                if c.is_ascii_graphic() && c != '"' && c != '\\' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let mut encoded = String::with_capacity(file_name.len() * 3);
        for byte in file_name.bytes() {
            if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
                encoded.push(byte as char);
            } else {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
        format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
    };

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

async fn locate(
    state: &AppState,
    kind: DownloadKind,
    id: &str,
) -> Result<(File, u64), DownloadError> {
    let path = resolve(state, kind, id)?;
    open(path).await
}

async fn serve_download(
    state: &AppState,
    kind: DownloadKind,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    // Undecodable identifiers (e.g. invalid UTF-8) get the same 404 as a miss.
    let Path(id) = id.map_err(|rejection| {
        debug!(error = %rejection, "rejected download path");
        ApiError::not_found(kind.not_found_message())
    })?;
    let file_name = kind.file_name(&id);

    let (file, len) = locate(state, kind, &id).await.map_err(|e| {
        match &e {
            DownloadError::Io { .. } => warn!(error = %e, "download failed"),
            _ => debug!(error = %e, "download not found"),
        }
        ApiError::not_found(kind.not_found_message())
    })?;

    let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
    let content_type = HeaderValue::from_str(content_type.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type),
            (CONTENT_DISPOSITION, content_disposition(&file_name)),
            (CONTENT_LENGTH, HeaderValue::from(len)),
        ],
        body,
    )
        .into_response())
}

/// `GET /api/download/mod/:mod_id`
pub async fn download_mod(
    State(state): State<AppState>,
    mod_id: Result<Path<String>, PathRejection>,
) -> Response {
    serve_download(&state, DownloadKind::Mod, mod_id)
        .await
        .into_response()
}

/// `GET /api/download/build/:build_name`
pub async fn download_build(
    State(state): State<AppState>,
    build_name: Result<Path<String>, PathRejection>,
) -> Response {
    serve_download(&state, DownloadKind::Build, build_name)
        .await
        .into_response()
}

/// `GET /api/download/update/:version`
pub async fn download_update(
    State(state): State<AppState>,
    version: Result<Path<String>, PathRejection>,
) -> Response {
    serve_download(&state, DownloadKind::Update, version)
        .await
        .into_response()
}
