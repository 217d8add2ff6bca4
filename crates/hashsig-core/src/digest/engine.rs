//! Chunked SHA-256 over a `ByteSource`.
//!
//! Reads consecutive chunks from offset 0, absorbs each into a single
//! accumulator and reports progress after every chunk. Memory use is bounded
//! by one chunk regardless of source size.

use sha2::{Digest as _, Sha256};
use std::io;
use std::path::Path;

use super::source::{ByteSource, FileSource};
use super::{Digest, Provenance};
use crate::control::{CancelToken, Cancelled};
use crate::progress::ProgressSample;

/// Default read size per chunk (256 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// A chunk read failed; no digest is produced.
    #[error("read failed at offset {offset}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

/// Computes digests by sequential fixed-size chunk reads.
#[derive(Debug, Clone, Copy)]
pub struct DigestEngine {
    chunk_size: usize,
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl DigestEngine {
    /// A chunk size of 0 is treated as 1.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash `source` from start to end.
    ///
    /// `on_progress` runs synchronously after each chunk is absorbed and before
    /// the next read; the last sample always has `bytes_processed == total_bytes`.
    /// An empty source yields the empty-input digest and one `(0, 0)` sample.
    pub fn compute<S, F>(
        &self,
        source: &mut S,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<Digest, DigestError>
    where
        S: ByteSource + ?Sized,
        F: FnMut(ProgressSample),
    {
        let total = source.len();
        let mut hasher = Sha256::new();

        if total == 0 {
            cancel.check()?;
            on_progress(ProgressSample::new(0, 0));
            return Ok(Digest::from_bytes(&hasher.finalize(), Provenance::Computed));
        }

        let buf_len = usize::try_from(total).map_or(self.chunk_size, |t| t.min(self.chunk_size));
        let mut buf = vec![0u8; buf_len];
        let mut offset = 0u64;

        while offset < total {
            cancel.check()?;
            let n = (total - offset).min(self.chunk_size as u64) as usize;
            let chunk = &mut buf[..n];
            source
                .read_at(offset, chunk)
                .map_err(|source| DigestError::Io { offset, source })?;
            hasher.update(&*chunk);
            offset += n as u64;
            on_progress(ProgressSample::new(offset, total));
        }

        Ok(Digest::from_bytes(&hasher.finalize(), Provenance::Computed))
    }
}

/// Open `path` and compute its digest with `engine`.
pub fn digest_path<F>(
    path: &Path,
    engine: &DigestEngine,
    cancel: &CancelToken,
    on_progress: F,
) -> Result<Digest, DigestError>
where
    F: FnMut(ProgressSample),
{
    let mut source = FileSource::open(path).map_err(|source| DigestError::Io { offset: 0, source })?;
    tracing::debug!(
        path = %source.path().display(),
        len = source.len(),
        chunk_size = engine.chunk_size(),
        "hashing file"
    );
    engine.compute(&mut source, cancel, on_progress)
}

#[cfg(test)]
mod tests;
