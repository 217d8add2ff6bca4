//! Shared helpers for the gpg-generated fixtures in `tests/fixtures`.
//!
//! `SHA256SUMS` holds the digest of `target_bytes()` and is signed by the
//! "release" key (binary `.sig` and armored `.asc`) and by the "other" key
//! (`.other.sig`). `NOTES` is signed by the release key but has no digest.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const RELEASE_FINGERPRINT: &str = "6769DAF1B92014098718A483E1890FFF6FB57A95";
pub const TARGET_DIGEST: &str = "7db7de02805282d3332a52410cd586f9a7be3bf46702b8be91b8779b8593a477";

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> Vec<u8> {
    fs::read(fixture(name)).unwrap()
}

pub fn read_fixture_text(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap()
}

/// 600 KiB of `i % 251`, the content `SHA256SUMS` was made for.
pub fn target_bytes() -> Vec<u8> {
    (0..600 * 1024usize).map(|i| (i % 251) as u8).collect()
}

/// Write `bytes` as `target.bin` under `dir`.
pub fn write_target(dir: &Path, bytes: &[u8]) -> PathBuf {
    let path = dir.join("target.bin");
    fs::write(&path, bytes).unwrap();
    path
}
