//! SHA-256 digests: the value type, chunked computation over byte sources,
//! extraction from signed checksum text and comparison.

mod compare;
mod engine;
mod extract;
mod source;

use serde::{Serialize, Serializer};
use std::fmt;

pub use compare::equal;
pub use engine::{digest_path, DigestEngine, DigestError, DEFAULT_CHUNK_SIZE};
pub use extract::{extract, NoDigestFound};
pub use source::{ByteSource, FileSource, SliceSource};

/// Number of hex characters in a SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Where a digest came from. Only used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Parsed out of a verified checksum payload.
    Extracted,
    /// Computed by hashing the target file.
    Computed,
}

/// A SHA-256 digest as 64 lowercase hex characters.
#[derive(Debug, Clone)]
pub struct Digest {
    hex: String,
    provenance: Provenance,
}

/// Input was not 64 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a SHA-256 hex digest: {0:?}")]
pub struct InvalidDigest(pub String);

impl Digest {
    /// Parse a hex digest (surrounding whitespace and case ignored).
    pub fn parse(s: &str, provenance: Provenance) -> Result<Self, InvalidDigest> {
        let t = s.trim();
        if t.len() != DIGEST_HEX_LEN || !t.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidDigest(s.to_string()));
        }
        Ok(Self {
            hex: t.to_ascii_lowercase(),
            provenance,
        })
    }

    pub(crate) fn from_bytes(bytes: &[u8], provenance: Provenance) -> Self {
        Self {
            hex: hex::encode(bytes),
            provenance,
        }
    }

    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        equal(&self.hex, &other.hex)
    }
}

impl Eq for Digest {}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex)
    }
}
