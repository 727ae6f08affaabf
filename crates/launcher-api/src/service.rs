//! Launcher API service: router construction and server lifecycle.

use crate::domain::config::ServerConfig;
use crate::domain::error::ServiceError;
use crate::handlers::{downloads, meta, resources, telemetry, updates, AppState};
use crate::middleware::{create_cors_layer, TracingLayer};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tracing::{info, warn};

/// Build the HTTP router over `state`.
pub fn build_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&state.config.cors))
        .layer(TracingLayer::new());

    Router::new()
        .route("/", get(meta::index))
        .route("/api/status", get(meta::status))
        .route("/api/config", get(resources::get_config))
        .route("/api/news", get(resources::get_news))
        .route("/api/versions", get(resources::get_versions))
        .route("/api/mods", get(resources::get_mods))
        .route("/api/builds", get(resources::get_builds))
        .route("/api/check_update", post(updates::check_update))
        .route("/api/download/mod/:mod_id", get(downloads::download_mod))
        .route("/api/download/build/:build_name", get(downloads::download_build))
        .route("/api/download/update/:version", get(downloads::download_update))
        .route("/api/stats", post(telemetry::record_stats))
        .route("/api/feedback", post(telemetry::record_feedback))
        .layer(middleware)
        .with_state(state)
}

/// Launcher API service
pub struct LauncherApiService {
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
}

impl LauncherApiService {
    /// Validate `config` and prepare the service.
    pub fn new(config: ServerConfig) -> Result<Self, ServiceError> {
        config.validate()?;

        if config.security.uses_default_secret() {
            warn!("SECRET_KEY is not set; responses are signed with the built-in default secret");
        }

        let (shutdown_tx, _) = watch::channel(false);
        Ok(Self {
            state: AppState::new(config),
            shutdown_tx,
        })
    }

    /// Router for this service
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind and serve until [`shutdown`](Self::shutdown) is called.
    pub async fn start(&self) -> Result<(), ServiceError> {
        let addr = self.state.config.http_addr();
        let listener = TcpListener::bind(addr).await.map_err(ServiceError::Bind)?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServiceError> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let addr = listener.local_addr().map_err(ServiceError::Bind)?;
        info!(
            addr = %addr,
            base_dir = %self.state.config.storage.base_dir.display(),
            "Launcher API listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
                info!("Received shutdown signal");
            })
            .await
            .map_err(ServiceError::Serve)?;

        info!("Launcher API stopped");
        Ok(())
    }

    /// Trigger graceful shutdown. Safe to call before or during `serve`.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }
}
