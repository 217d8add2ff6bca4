//! The four inputs a run needs.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::digest::{ByteSource, FileSource};

/// Public key, signed checksum file, detached signature and the target to hash.
#[derive(Debug)]
pub struct PipelineInputs<S> {
    pub(crate) public_key: String,
    pub(crate) hash_file_name: String,
    pub(crate) hash_file: Vec<u8>,
    pub(crate) signature: Vec<u8>,
    pub(crate) target_name: String,
    pub(crate) target: S,
}

impl<S: ByteSource> PipelineInputs<S> {
    pub fn new(
        public_key: impl Into<String>,
        hash_file_name: impl Into<String>,
        hash_file: Vec<u8>,
        signature: Vec<u8>,
        target_name: impl Into<String>,
        target: S,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            hash_file_name: hash_file_name.into(),
            hash_file,
            signature,
            target_name: target_name.into(),
            target,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl PipelineInputs<FileSource> {
    /// Read key, checksum file and signature into memory and open the target.
    ///
    /// The target is only opened here; it is read chunk by chunk during the run.
    pub fn from_paths(key: &Path, hash_file: &Path, signature: &Path, target: &Path) -> Result<Self> {
        let key_bytes =
            fs::read(key).with_context(|| format!("read public key {}", key.display()))?;
        let public_key = String::from_utf8_lossy(&key_bytes).into_owned();
        let hash_bytes =
            fs::read(hash_file).with_context(|| format!("read hash file {}", hash_file.display()))?;
        let sig_bytes =
            fs::read(signature).with_context(|| format!("read signature {}", signature.display()))?;
        let source =
            FileSource::open(target).with_context(|| format!("open {}", target.display()))?;
        Ok(Self::new(
            public_key,
            display_name(hash_file),
            hash_bytes,
            sig_bytes,
            display_name(target),
            source,
        ))
    }
}
