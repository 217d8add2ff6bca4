//! rPGP implementation of `SignatureBackend`.

use pgp::types::KeyTrait;
use pgp::{Deserializable, SignedPublicKey, StandaloneSignature};

use super::{BackendError, SignatureBackend};

const SIGNATURE_BEGIN: &[u8] = b"-----BEGIN PGP SIGNATURE-----";

/// OpenPGP backend over the `pgp` crate.
///
/// Accepts binary or ASCII-armored detached signatures; the message is the
/// raw signed bytes (binary signature mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct PgpBackend;

impl PgpBackend {
    pub fn new() -> Self {
        Self
    }
}

fn is_armored(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(SIGNATURE_BEGIN)
}

fn exactly_one(
    mut sigs: impl Iterator<Item = pgp::errors::Result<StandaloneSignature>>,
) -> Result<StandaloneSignature, BackendError> {
    let first = sigs
        .next()
        .ok_or_else(|| BackendError::Malformed("no signature packet found".to_string()))?
        .map_err(|e| BackendError::Malformed(format!("signature: {}", e)))?;
    if sigs.next().is_some() {
        return Err(BackendError::Malformed(
            "expected exactly one detached signature".to_string(),
        ));
    }
    Ok(first)
}

impl SignatureBackend for PgpBackend {
    type Key = SignedPublicKey;
    type Signature = StandaloneSignature;
    type Message = Vec<u8>;

    fn parse_key(&self, armored: &str) -> Result<SignedPublicKey, BackendError> {
        let (key, _headers) = SignedPublicKey::from_string(armored)
            .map_err(|e| BackendError::Malformed(format!("public key: {}", e)))?;
        key.verify()
            .map_err(|e| BackendError::Malformed(format!("public key self-signature: {}", e)))?;
        Ok(key)
    }

    fn parse_signature(&self, bytes: &[u8]) -> Result<StandaloneSignature, BackendError> {
        if is_armored(bytes) {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| BackendError::Malformed(format!("armored signature: {}", e)))?;
            let (sigs, _headers) = StandaloneSignature::from_string_many(text)
                .map_err(|e| BackendError::Malformed(format!("armored signature: {}", e)))?;
            exactly_one(sigs)
        } else {
            exactly_one(StandaloneSignature::from_bytes_many(bytes))
        }
    }

    fn parse_message(&self, bytes: &[u8]) -> Result<Vec<u8>, BackendError> {
        Ok(bytes.to_vec())
    }

    fn verify(
        &self,
        key: &SignedPublicKey,
        signature: &StandaloneSignature,
        message: &Vec<u8>,
    ) -> Result<String, BackendError> {
        let fingerprint = hex::encode_upper(key.fingerprint());

        let primary = match signature.verify(key, message) {
            Ok(()) => return Ok(fingerprint),
            Err(e) => e,
        };
        for subkey in &key.public_subkeys {
            if signature.verify(subkey, message).is_ok() {
                tracing::debug!(
                    subkey = %hex::encode_upper(subkey.fingerprint()),
                    "signature made by subkey"
                );
                return Ok(fingerprint);
            }
        }
        Err(BackendError::BadSignature(primary.to_string()))
    }
}
