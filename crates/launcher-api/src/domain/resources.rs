//! Served resources and download kinds.
//!
//! The fallback for each JSON resource is deliberately asymmetric: a missing
//! config is an error, missing listings are just empty.

use axum::http::StatusCode;
use serde_json::{json, Value};

/// Operator-owned JSON documents served through the signing envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Config,
    News,
    Versions,
    Mods,
    Builds,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::Config => "config",
            Resource::News => "news",
            Resource::Versions => "versions",
            Resource::Mods => "mods",
            Resource::Builds => "builds",
        }
    }

    /// File name under the base directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Resource::Config => "config.json",
            Resource::News => "news.json",
            Resource::Versions => "versions.json",
            Resource::Mods => "mods.json",
            Resource::Builds => "builds.json",
        }
    }

    /// Unsigned status and body returned when the file cannot be loaded.
    pub fn fallback(self) -> (StatusCode, Value) {
        match self {
            Resource::Config => (StatusCode::NOT_FOUND, json!({ "error": "Config not found" })),
            Resource::News | Resource::Mods | Resource::Builds => (StatusCode::OK, json!([])),
            Resource::Versions => (StatusCode::OK, json!({})),
        }
    }
}

/// Static file families under `downloads/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Mod,
    Build,
    Update,
}

impl DownloadKind {
    /// Subdirectory of `downloads/`.
    pub fn subdir(self) -> &'static str {
        match self {
            DownloadKind::Mod => "mods",
            DownloadKind::Build => "builds",
            DownloadKind::Update => "updates",
        }
    }

    /// Map a client identifier to the on-disk file name.
    pub fn file_name(self, id: &str) -> String {
        match self {
            DownloadKind::Mod => format!("{id}.jar"),
            DownloadKind::Build => format!("{id}.zip"),
            DownloadKind::Update => format!("launcher_v{id}.exe"),
        }
    }

    /// `error` value of the 404 body.
    pub fn not_found_message(self) -> &'static str {
        match self {
            DownloadKind::Mod => "Mod not found",
            DownloadKind::Build => "Build not found",
            DownloadKind::Update => "Update not found",
        }
    }
}
