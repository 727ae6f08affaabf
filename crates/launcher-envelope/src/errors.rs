//! Envelope error types.

use thiserror::Error;

/// Envelope signing and verification errors.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Payload could not be serialized to JSON
    #[error("Payload serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Verified payload could not be deserialized into the requested type
    #[error("Payload deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// HMAC rejected the key
    #[error("Invalid signing key")]
    InvalidKey,

    /// `data` field is not valid base64
    #[error("Invalid data encoding: {0}")]
    InvalidDataEncoding(String),

    /// `signature` field is not valid hex
    #[error("Invalid signature format: {0}")]
    InvalidSignatureFormat(String),

    /// Signature does not match the decoded data
    #[error("Signature verification failed")]
    SignatureMismatch,
}

impl EnvelopeError {
    /// Returns true if the envelope was well-formed but its contents were tampered
    /// with or signed under a different key.
    pub fn is_tampered(&self) -> bool {
        matches!(
            self,
            EnvelopeError::SignatureMismatch
                | EnvelopeError::InvalidDataEncoding(_)
                | EnvelopeError::InvalidSignatureFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tamper_classification() {
        assert!(EnvelopeError::SignatureMismatch.is_tampered());
        assert!(EnvelopeError::InvalidDataEncoding("bad".into()).is_tampered());
        assert!(!EnvelopeError::InvalidKey.is_tampered());
    }

    #[test]
    fn test_error_display() {
        let err = EnvelopeError::InvalidSignatureFormat("odd length".into());
        assert!(err.to_string().contains("odd length"));
    }
}
