//! # Launcher Envelope - Signed Response Envelopes
//!
//! Every JSON resource served by the launcher API is wrapped in an envelope
//! before it leaves the server:
//!
//! ```text
//! {
//!   "data":      base64(utf8(json(payload))),
//!   "signature": hex(HMAC-SHA256(secret, json(payload))),
//!   "timestamp": ISO-8601 wall clock
//! }
//! ```
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `key` | Shared secret, zeroized on drop |
//! | `envelope` | Immutable [`Envelope`] value |
//! | `signer` | [`EnvelopeSigner`]: sign, verify, open |
//! | `errors` | [`EnvelopeError`] |
//!
//! ## Properties
//!
//! - The signature covers the exact JSON bytes carried in `data`, never the
//!   timestamp. Signing the same payload twice yields the same `data` and
//!   `signature`.
//! - Verification is constant-time (`Mac::verify_slice`).
//!
//! ## Usage
//!
//! ```
//! use launcher_envelope::EnvelopeSigner;
//!
//! let signer = EnvelopeSigner::new(b"shared-secret".to_vec());
//! let envelope = signer.sign(&serde_json::json!({"motd": "hello"})).unwrap();
//! let payload: serde_json::Value = signer.open(&envelope).unwrap();
//! assert_eq!(payload["motd"], "hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod envelope;
pub mod errors;
pub mod key;
pub mod signer;

// Re-exports
pub use envelope::Envelope;
pub use errors::EnvelopeError;
pub use key::SecretKey;
pub use signer::{now_iso8601, EnvelopeSigner};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
