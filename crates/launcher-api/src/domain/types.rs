//! Request, record and response types.
//!
//! Telemetry fields are `Option<Value>`: whatever the launcher sends is stored
//! as-is, and a missing field is written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version assumed when a client does not declare one.
pub const DEFAULT_CLIENT_VERSION: &str = "1.0.0";

/// Name reported by `GET /`.
pub const SERVER_NAME: &str = "Minecraft Launcher API";

// =============================================================================
// Meta
// =============================================================================

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub status: String,
    pub server: String,
    pub railway: bool,
}

impl Default for IndexResponse {
    fn default() -> Self {
        Self {
            status: "online".to_string(),
            server: SERVER_NAME.to_string(),
            railway: true,
        }
    }
}

/// `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub time: String,
}

/// `{"success": true}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// =============================================================================
// Update check
// =============================================================================

/// `POST /api/check_update` body
#[derive(Debug, Clone, Default)]
pub struct UpdateCheckRequest {
    /// Raw `version` value as sent, `None` when the key is absent
    pub version: Option<Value>,
}

impl UpdateCheckRequest {
    /// Pull `version` out of a JSON body. Anything but an object counts as an
    /// empty body.
    pub fn from_body(body: &Value) -> Self {
        Self {
            version: body.get("version").cloned(),
        }
    }

    /// Declared version, defaulting to `1.0.0` when absent. `None` when the
    /// client sent a non-string, which is never comparable.
    pub fn client_version(&self) -> Option<&str> {
        match &self.version {
            None => Some(DEFAULT_CLIENT_VERSION),
            Some(Value::String(version)) => Some(version),
            Some(_) => None,
        }
    }
}

/// `updates.json`, owned by operators.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDescriptor {
    /// Absent means "never offer an update"
    #[serde(default)]
    pub latest_version: Option<String>,
    /// Passed through verbatim, `[]` when absent
    #[serde(default)]
    pub changelog: Option<Value>,
}

/// `POST /api/check_update` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCheckResponse {
    pub update_available: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latest_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub changelog: Option<Value>,
}

impl UpdateCheckResponse {
    pub fn none() -> Self {
        Self {
            update_available: false,
            latest_version: None,
            download_url: None,
            changelog: None,
        }
    }

    pub fn available(latest_version: String, changelog: Option<Value>) -> Self {
        let download_url = format!("/api/download/update/{latest_version}");
        Self {
            update_available: true,
            latest_version: Some(latest_version),
            download_url: Some(download_url),
            changelog: Some(changelog.unwrap_or_else(|| Value::Array(Vec::new()))),
        }
    }
}

// =============================================================================
// Telemetry
// =============================================================================

/// `POST /api/stats` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub ram: Option<Value>,
}

/// `POST /api/feedback` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
}

/// One launch in `logs/stats.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub timestamp: String,
    pub username: Option<Value>,
    pub version: Option<Value>,
    pub ram: Option<Value>,
}

impl StatsRecord {
    pub fn new(timestamp: String, request: StatsRequest) -> Self {
        Self {
            timestamp,
            username: request.username,
            version: request.version,
            ram: request.ram,
        }
    }
}

/// One entry in `logs/feedback.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: String,
    pub username: Option<Value>,
    pub message: Option<Value>,
    pub rating: Option<Value>,
}

impl FeedbackRecord {
    pub fn new(timestamp: String, request: FeedbackRequest) -> Self {
        Self {
            timestamp,
            username: request.username,
            message: request.message,
            rating: request.rating,
        }
    }
}

/// `logs/stats.json`: `{"launches": [...]}`. Other top-level keys an operator
/// may have added are carried through rewrites untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsLog {
    pub launches: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `logs/feedback.json`: a bare array.
pub type FeedbackLog = Vec<Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request_default_version() {
        let req = UpdateCheckRequest::from_body(&json!({}));
        assert_eq!(req.client_version(), Some("1.0.0"));

        let req = UpdateCheckRequest::from_body(&json!({"version": "1.4.2"}));
        assert_eq!(req.client_version(), Some("1.4.2"));

        let req = UpdateCheckRequest::from_body(&json!([1, 2]));
        assert_eq!(req.client_version(), Some("1.0.0"));
    }

    #[test]
    fn test_update_request_non_string_version() {
        let req = UpdateCheckRequest::from_body(&json!({"version": 2}));
        assert_eq!(req.client_version(), None);

        let req = UpdateCheckRequest::from_body(&json!({"version": null}));
        assert_eq!(req.client_version(), None);
    }

    #[test]
    fn test_no_update_response_shape() {
        let json = serde_json::to_value(UpdateCheckResponse::none()).unwrap();
        assert_eq!(json, json!({"update_available": false}));
    }

    #[test]
    fn test_available_response_shape() {
        let response =
            UpdateCheckResponse::available("1.2.0".into(), Some(json!(["Fixed crash"])));
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "update_available": true,
                "latest_version": "1.2.0",
                "download_url": "/api/download/update/1.2.0",
                "changelog": ["Fixed crash"]
            })
        );
    }

    #[test]
    fn test_available_defaults_changelog() {
        let response = UpdateCheckResponse::available("2.0.0".into(), None);
        assert_eq!(response.changelog, Some(json!([])));
    }

    #[test]
    fn test_descriptor_defaults() {
        let descriptor: UpdateDescriptor = serde_json::from_value(json!({})).unwrap();
        assert!(descriptor.latest_version.is_none());
        assert!(descriptor.changelog.is_none());
    }

    #[test]
    fn test_stats_record_missing_fields_are_null() {
        let req: StatsRequest =
            serde_json::from_value(json!({"username": "steve", "extra": 1})).unwrap();
        let record = StatsRecord::new("t".into(), req);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"timestamp": "t", "username": "steve", "version": null, "ram": null})
        );
    }

    #[test]
    fn test_stats_log_keeps_extra_keys() {
        let log: StatsLog =
            serde_json::from_value(json!({"launches": [], "note": "kept"})).unwrap();
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["note"], "kept");
        assert_eq!(json["launches"], json!([]));
    }

    #[test]
    fn test_stats_log_requires_launches() {
        let result: Result<StatsLog, _> = serde_json::from_value(json!({"other": []}));
        assert!(result.is_err());
    }
}
