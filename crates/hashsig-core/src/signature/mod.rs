//! Detached-signature verification of the checksum file.
//!
//! The cryptographic primitive sits behind `SignatureBackend` so the verifier
//! and the pipeline never touch a concrete OpenPGP library. `PgpBackend` is
//! the rPGP implementation.

mod openpgp;
mod verifier;

pub use openpgp::PgpBackend;
pub use verifier::{normalize_key_text, SignatureVerifier, VerifiedPayload, VerifyFailure};

/// Failure reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Key, signature or message bytes could not be parsed.
    #[error("malformed input: {0}")]
    Malformed(String),
    /// Inputs parsed but the cryptographic check failed (wrong key, altered data).
    #[error("bad signature: {0}")]
    BadSignature(String),
    /// Anything else the primitive reported (unsupported algorithm, ...).
    #[error("{0}")]
    Other(String),
}

/// Narrow capability interface over an OpenPGP implementation.
///
/// One call binds exactly one key, one signature and one message.
pub trait SignatureBackend {
    type Key;
    type Signature;
    type Message;

    /// Parse an armored public key (already normalized).
    fn parse_key(&self, armored: &str) -> Result<Self::Key, BackendError>;

    /// Parse exactly one detached signature.
    fn parse_signature(&self, bytes: &[u8]) -> Result<Self::Signature, BackendError>;

    /// Wrap the signed payload bytes.
    fn parse_message(&self, bytes: &[u8]) -> Result<Self::Message, BackendError>;

    /// Check the signature; returns the signer's key fingerprint (uppercase hex).
    fn verify(
        &self,
        key: &Self::Key,
        signature: &Self::Signature,
        message: &Self::Message,
    ) -> Result<String, BackendError>;
}
