//! # Envelope Signer
//!
//! HMAC-SHA256 over the serialized payload bytes. The server calls
//! [`EnvelopeSigner::sign`]; launcher clients (and tests) call
//! [`EnvelopeSigner::verify`] or [`EnvelopeSigner::open`].

use crate::envelope::Envelope;
use crate::errors::EnvelopeError;
use crate::key::SecretKey;
use base64::prelude::*;
use chrono::{Local, SecondsFormat};
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Current local wall-clock time as ISO-8601 with microseconds and offset.
pub fn now_iso8601() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Signs and verifies envelopes under one shared secret.
#[derive(Debug, Clone)]
pub struct EnvelopeSigner {
    key: SecretKey,
}

impl EnvelopeSigner {
    /// Create a signer from the shared secret.
    pub fn new(key: impl Into<SecretKey>) -> Self {
        Self { key: key.into() }
    }

    /// Wrap `payload` in a signed envelope stamped with the current time.
    ///
    /// Serialization failure is returned, never swallowed: it means a handler
    /// tried to sign something that is not JSON.
    pub fn sign<T>(&self, payload: &T) -> Result<Envelope, EnvelopeError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_vec(payload).map_err(EnvelopeError::Serialization)?;
        let signature = hex::encode(self.mac(&json)?);
        let data = BASE64_STANDARD.encode(&json);

        Ok(Envelope::new(data, signature, now_iso8601()))
    }

    /// Check `signature` against the base64 `data` and return the decoded JSON bytes.
    pub fn verify(&self, data: &str, signature: &str) -> Result<Vec<u8>, EnvelopeError> {
        let json = BASE64_STANDARD
            .decode(data)
            .map_err(|e| EnvelopeError::InvalidDataEncoding(e.to_string()))?;
        let expected =
            hex::decode(signature).map_err(|e| EnvelopeError::InvalidSignatureFormat(e.to_string()))?;

        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|_| EnvelopeError::InvalidKey)?;
        mac.update(&json);
        mac.verify_slice(&expected)
            .map_err(|_| EnvelopeError::SignatureMismatch)?;

        Ok(json)
    }

    /// Verify an envelope and deserialize its payload.
    pub fn open<T: DeserializeOwned>(&self, envelope: &Envelope) -> Result<T, EnvelopeError> {
        let json = self.verify(envelope.data(), envelope.signature())?;
        serde_json::from_slice(&json).map_err(EnvelopeError::Deserialization)
    }

    fn mac(&self, bytes: &[u8]) -> Result<[u8; 32], EnvelopeError> {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|_| EnvelopeError::InvalidKey)?;
        mac.update(bytes);
        Ok(mac.finalize().into_bytes().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    const BASE64_ALPHABET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    const HEX_ALPHABET: &[u8] = b"0123456789abcdef";

    fn signer() -> EnvelopeSigner {
        EnvelopeSigner::new("test-secret-key")
    }

    /// Replace the char at `index` with a different one from `alphabet`.
    fn mutate(s: &str, index: usize, pick: usize, alphabet: &[u8]) -> String {
        let mut bytes = s.as_bytes().to_vec();
        let index = index % bytes.len();
        let original = bytes[index];
        let candidates: Vec<u8> = alphabet.iter().copied().filter(|c| *c != original).collect();
        bytes[index] = candidates[pick % candidates.len()];
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_known_vector() {
        // digest over the compact JSON bytes, computed without the signer
        let signer = EnvelopeSigner::new("key");
        let envelope = signer.sign(&json!({"a": 1})).unwrap();

        assert_eq!(envelope.data(), BASE64_STANDARD.encode(br#"{"a":1}"#));
        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(br#"{"a":1}"#);
        assert_eq!(envelope.signature(), hex::encode(mac.finalize().into_bytes()));
        assert_eq!(envelope.signature().len(), 64);
    }

    #[test]
    fn test_sign_and_open() {
        let payload = json!({"server": "play.example.net", "ports": [25565, 25566]});
        let envelope = signer().sign(&payload).unwrap();

        let opened: Value = signer().open(&envelope).unwrap();
        assert_eq!(opened, payload);
    }

    #[test]
    fn test_preserves_source_field_order() {
        let payload: Value = serde_json::from_str(r#"{"zeta":1,"alpha":2}"#).unwrap();
        let envelope = signer().sign(&payload).unwrap();

        let json = signer().verify(envelope.data(), envelope.signature()).unwrap();
        assert_eq!(json, br#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_non_ascii_payload_is_raw_utf8() {
        let envelope = signer().sign(&json!(["Новости"])).unwrap();
        let json = signer().verify(envelope.data(), envelope.signature()).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), r#"["Новости"]"#);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let envelope = signer().sign(&json!([1, 2, 3])).unwrap();
        let other = EnvelopeSigner::new("another-key");

        let result = other.verify(envelope.data(), envelope.signature());
        assert!(matches!(result, Err(EnvelopeError::SignatureMismatch)));
    }

    #[test]
    fn test_malformed_fields() {
        let envelope = signer().sign(&json!({})).unwrap();

        assert!(matches!(
            signer().verify("not base64!!", envelope.signature()),
            Err(EnvelopeError::InvalidDataEncoding(_))
        ));
        assert!(matches!(
            signer().verify(envelope.data(), "xyz"),
            Err(EnvelopeError::InvalidSignatureFormat(_))
        ));
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let envelope = signer().sign(&json!(null)).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(envelope.timestamp()).is_ok());
    }

    #[test]
    fn test_open_wrong_type() {
        let envelope = signer().sign(&json!({"not": "a list"})).unwrap();
        let result: Result<Vec<u32>, _> = signer().open(&envelope);
        assert!(matches!(result, Err(EnvelopeError::Deserialization(_))));
    }

    fn arb_payload() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            ".{0,24}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_sign_then_verify(payload in arb_payload()) {
            let envelope = signer().sign(&payload).unwrap();
            let opened: Value = signer().open(&envelope).unwrap();
            prop_assert_eq!(opened, payload);
        }

        #[test]
        fn prop_signature_ignores_timestamp(payload in arb_payload()) {
            let first = signer().sign(&payload).unwrap();
            let second = signer().sign(&payload).unwrap();
            prop_assert_eq!(first.data(), second.data());
            prop_assert_eq!(first.signature(), second.signature());
        }

        #[test]
        fn prop_tampered_data_rejected(payload in arb_payload(), index in any::<usize>(), pick in any::<usize>()) {
            let envelope = signer().sign(&payload).unwrap();
            let tampered = mutate(envelope.data(), index, pick, BASE64_ALPHABET);
            prop_assert!(signer().verify(&tampered, envelope.signature()).is_err());
        }

        #[test]
        fn prop_tampered_signature_rejected(payload in arb_payload(), index in any::<usize>(), pick in any::<usize>()) {
            let envelope = signer().sign(&payload).unwrap();
            let tampered = mutate(envelope.signature(), index, pick, HEX_ALPHABET);
            prop_assert!(signer().verify(envelope.data(), &tampered).is_err());
        }
    }
}
