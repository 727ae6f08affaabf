//! Liveness endpoints.

use crate::domain::types::{IndexResponse, StatusResponse};
use axum::Json;
use launcher_envelope::now_iso8601;

/// `GET /`
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse::default())
}

/// `GET /api/status`
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online".to_string(),
        time: now_iso8601(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index() {
        let Json(body) = index().await;
        assert_eq!(body.status, "online");
        assert_eq!(body.server, "Minecraft Launcher API");
        assert!(body.railway);
    }

    #[tokio::test]
    async fn test_status_time_is_iso8601() {
        let Json(body) = status().await;
        assert_eq!(body.status, "online");
        assert!(body.time.contains('T'));
    }
}
