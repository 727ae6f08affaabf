//! Signed envelope value.

use serde::{Deserialize, Serialize};

/// A signed, encoded JSON payload.
///
/// Fields are private: an envelope is produced by [`crate::EnvelopeSigner::sign`]
/// or deserialized from the wire, and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    data: String,
    signature: String,
    timestamp: String,
}

impl Envelope {
    pub(crate) fn new(data: String, signature: String, timestamp: String) -> Self {
        Self {
            data,
            signature,
            timestamp,
        }
    }

    /// Base64 of the UTF-8 JSON payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Lowercase hex HMAC-SHA256 of the JSON payload.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// ISO-8601 time the envelope was produced.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let envelope = Envelope::new("e30=".into(), "00ff".into(), "2024-01-01T00:00:00Z".into());
        let json = serde_json::to_value(&envelope).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["data"], "e30=");
        assert_eq!(obj["signature"], "00ff");
        assert_eq!(obj["timestamp"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_deserialize_from_wire() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"data":"e30=","signature":"ab","timestamp":"t"}"#,
        )
        .unwrap();
        assert_eq!(envelope.data(), "e30=");
        assert_eq!(envelope.signature(), "ab");
        assert_eq!(envelope.timestamp(), "t");
    }
}
