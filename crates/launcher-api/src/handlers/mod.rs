//! HTTP handlers.
//!
//! Every handler catches its own failures and answers with a response; nothing
//! here returns an error to axum.

pub mod downloads;
pub mod meta;
pub mod resources;
pub mod telemetry;
pub mod updates;

use crate::domain::config::ServerConfig;
use launcher_envelope::EnvelopeSigner;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub signer: Arc<EnvelopeSigner>,
    pub logs: Arc<LogLocks>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let signer = EnvelopeSigner::new(config.security.secret_key.as_str());
        Self {
            config: Arc::new(config),
            signer: Arc::new(signer),
            logs: Arc::new(LogLocks::default()),
        }
    }
}

/// One lock per telemetry log, held across each read-modify-rewrite.
#[derive(Debug, Default)]
pub struct LogLocks {
    pub stats: Mutex<()>,
    pub feedback: Mutex<()>,
}
