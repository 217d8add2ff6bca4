//! Terminal outcome of one verification run.

use serde::Serialize;
use std::fmt;

/// The single verdict a pipeline run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The cryptographic check failed (wrong key, altered checksum file).
    SignatureInvalid,
    /// Key, signature or message could not be parsed.
    MalformedInput,
    /// The verified payload holds no 64-hex-character digest.
    NoDigestFound,
    DigestsMatch,
    DigestsMismatch,
    /// Reading the target file failed.
    IoFailure,
    /// Stopped through the cancel token.
    Cancelled,
}

impl Verdict {
    /// True only for `DigestsMatch`.
    pub fn is_success(self) -> bool {
        matches!(self, Verdict::DigestsMatch)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::SignatureInvalid => "Signature is invalid.",
            Verdict::MalformedInput => {
                "Verification failed. Please check your files and try again."
            }
            Verdict::NoDigestFound => "No valid SHA256 hash found in the verified file",
            Verdict::DigestsMatch => "Hashes match - file is legitimate",
            Verdict::DigestsMismatch => "Hashes do not match - file may have been tampered with",
            Verdict::IoFailure => "Could not read the file to verify",
            Verdict::Cancelled => "Verification cancelled",
        };
        f.write_str(s)
    }
}
