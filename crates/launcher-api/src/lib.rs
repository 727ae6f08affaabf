#![allow(missing_docs)]

//! Launcher API - metadata, update checks, downloads and telemetry for a game
//! launcher.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         LAUNCHER API                               │
//! ├────────────────────────────────────────────────────────────────────┤
//! │   Middleware: CORS → Tracing                                       │
//! │                                                                    │
//! │   ┌──────────────┐ ┌──────────────┐ ┌────────────┐ ┌────────────┐  │
//! │   │  Resources   │ │ Update check │ │ Downloads  │ │ Telemetry  │  │
//! │   │ config, news │ │ updates.json │ │ mods/      │ │ logs/      │  │
//! │   │ versions ... │ │              │ │ builds/ …  │ │ stats,     │  │
//! │   └──────┬───────┘ └──────────────┘ └────────────┘ │ feedback   │  │
//! │          │                                         └────────────┘  │
//! │          ▼                                                         │
//! │   ┌─────────────────────────────┐                                  │
//! │   │  launcher-envelope (HMAC)   │                                  │
//! │   └─────────────────────────────┘                                  │
//! └────────────────────────────────────────────────────────────────────┘
//!                          │
//!                     base_dir/ (local disk)
//! ```
//!
//! The five JSON resources are wrapped in a signed envelope. Their fallbacks,
//! update-check answers, downloads and telemetry acknowledgements are not.
//!
//! # Usage
//!
//! ```ignore
//! use launcher_api::{LauncherApiService, ServerConfig};
//!
//! let service = LauncherApiService::new(ServerConfig::default())?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use domain::config::{ConfigError, ServerConfig};
pub use domain::error::{ApiError, ServiceError};
pub use handlers::AppState;
pub use service::{build_router, LauncherApiService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
