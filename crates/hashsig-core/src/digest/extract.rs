//! Find the expected digest inside a verified checksum payload.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Digest, Provenance};

/// Any 64 consecutive hex characters, wherever they occur.
static DIGEST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9A-Fa-f]{64}").expect("digest pattern is valid"));

/// The payload has no 64-hex-character run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no valid SHA-256 hash found in the verified file")]
pub struct NoDigestFound;

/// Returns the left-most 64-hex-character substring of `payload`, lower-cased.
///
/// A longer hex run (e.g. a SHA-512 digest) yields its first 64 characters.
pub fn extract(payload: &str) -> Result<Digest, NoDigestFound> {
    let m = DIGEST_RE.find(payload).ok_or(NoDigestFound)?;
    Digest::parse(m.as_str(), Provenance::Extracted).map_err(|_| NoDigestFound)
}
