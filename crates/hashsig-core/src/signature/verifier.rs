//! Key normalization and backend outcome mapping.

use super::{BackendError, SignatureBackend};
use crate::verdict::Verdict;

const KEY_BEGIN: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----";
const KEY_END: &str = "-----END PGP PUBLIC KEY BLOCK-----";

/// Payload bytes proven authentic, decoded as text, plus the signer fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayload {
    text: String,
    fingerprint: String,
}

impl VerifiedPayload {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Why a payload could not be verified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyFailure {
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("signature is invalid: {0}")]
    Invalid(String),
}

impl VerifyFailure {
    pub fn verdict(&self) -> Verdict {
        match self {
            VerifyFailure::Malformed(_) => Verdict::MalformedInput,
            VerifyFailure::Invalid(_) => Verdict::SignatureInvalid,
        }
    }
}

impl From<BackendError> for VerifyFailure {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::BadSignature(msg) => VerifyFailure::Invalid(msg),
            BackendError::Malformed(msg) | BackendError::Other(msg) => VerifyFailure::Malformed(msg),
        }
    }
}

/// Unify line endings to `\n` and trim surrounding whitespace.
pub fn normalize_key_text(armored: &str) -> String {
    armored.replace("\r\n", "\n").trim().to_string()
}

/// Verifies a detached signature over a payload through a `SignatureBackend`.
#[derive(Debug, Clone, Default)]
pub struct SignatureVerifier<B> {
    backend: B,
}

impl<B: SignatureBackend> SignatureVerifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Verify `signature` over `payload` with `public_key` (armored text).
    ///
    /// On success the payload is decoded as text (invalid UTF-8 is replaced).
    pub fn verify(
        &self,
        public_key: &str,
        payload: &[u8],
        signature: &[u8],
    ) -> Result<VerifiedPayload, VerifyFailure> {
        let key_text = normalize_key_text(public_key);
        if !key_text.contains(KEY_BEGIN) || !key_text.contains(KEY_END) {
            return Err(VerifyFailure::Malformed("invalid key block".to_string()));
        }

        let key = self.backend.parse_key(&key_text)?;
        let sig = self.backend.parse_signature(signature)?;
        let message = self.backend.parse_message(payload)?;
        let fingerprint = self.backend.verify(&key, &sig, &message)?;
        tracing::debug!(%fingerprint, payload_len = payload.len(), "signature verified");

        Ok(VerifiedPayload {
            text: String::from_utf8_lossy(payload).into_owned(),
            fingerprint,
        })
    }
}
