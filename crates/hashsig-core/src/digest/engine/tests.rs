use super::*;
use crate::digest::SliceSource;
use sha2::Digest as _;
use std::io::Write;

const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn one_pass(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Source whose reads fail once `fail_at` is reached.
struct FailingSource {
    len: u64,
    fail_at: u64,
}

impl ByteSource for FailingSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        if offset >= self.fail_at {
            return Err(io::Error::new(io::ErrorKind::Other, "disk went away"));
        }
        buf.fill(0);
        Ok(())
    }
}

#[test]
fn chunk_size_does_not_change_digest() {
    let bytes = sample_bytes(10_000);
    let expected = one_pass(&bytes);
    for chunk in [1, 7, 64, 1000, 4096, 9_999, 10_000, 10_001, DEFAULT_CHUNK_SIZE] {
        let mut src = SliceSource::new(&bytes);
        let d = DigestEngine::new(chunk)
            .compute(&mut src, &CancelToken::new(), |_| {})
            .unwrap();
        assert_eq!(d.as_hex(), expected, "chunk size {}", chunk);
        assert_eq!(d.provenance(), Provenance::Computed);
    }
}

#[test]
fn progress_is_monotonic_and_ends_at_total() {
    let bytes = sample_bytes(1000);
    let mut samples = Vec::new();
    let mut src = SliceSource::new(&bytes);
    DigestEngine::new(300)
        .compute(&mut src, &CancelToken::new(), |s| samples.push(s))
        .unwrap();
    let done: Vec<u64> = samples.iter().map(|s| s.bytes_processed).collect();
    assert_eq!(done, vec![300, 600, 900, 1000]);
    assert!(samples.iter().all(|s| s.total_bytes == 1000));
    assert!(done.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn empty_source_reports_zero_once() {
    let mut samples = Vec::new();
    let mut src = SliceSource::new(&[]);
    let d = DigestEngine::default()
        .compute(&mut src, &CancelToken::new(), |s| samples.push(s))
        .unwrap();
    assert_eq!(d.as_hex(), EMPTY);
    assert_eq!(samples, vec![ProgressSample::new(0, 0)]);
}

#[test]
fn zero_chunk_size_is_clamped() {
    let engine = DigestEngine::new(0);
    assert_eq!(engine.chunk_size(), 1);
    let mut src = SliceSource::new(b"abc");
    let d = engine.compute(&mut src, &CancelToken::new(), |_| {}).unwrap();
    assert_eq!(d.as_hex(), one_pass(b"abc"));
}

#[test]
fn read_failure_aborts_without_digest() {
    let mut src = FailingSource {
        len: 1000,
        fail_at: 500,
    };
    let mut last = 0;
    let err = DigestEngine::new(250)
        .compute(&mut src, &CancelToken::new(), |s| last = s.bytes_processed)
        .unwrap_err();
    match err {
        DigestError::Io { offset, .. } => assert_eq!(offset, 500),
        other => panic!("expected Io, got {:?}", other),
    }
    assert_eq!(last, 500);
}

#[test]
fn cancel_between_chunks() {
    let bytes = sample_bytes(1000);
    let cancel = CancelToken::new();
    let mut seen = 0;
    let mut src = SliceSource::new(&bytes);
    let err = DigestEngine::new(100)
        .compute(&mut src, &cancel, |s| {
            seen += 1;
            if s.bytes_processed == 200 {
                cancel.cancel();
            }
        })
        .unwrap_err();
    assert!(matches!(err, DigestError::Cancelled(Cancelled)));
    assert_eq!(seen, 2);
}

#[test]
fn digest_path_known_content() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"hello\n").unwrap();
    f.flush().unwrap();
    let d = digest_path(f.path(), &DigestEngine::new(2), &CancelToken::new(), |_| {}).unwrap();
    assert_eq!(
        d.as_hex(),
        "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
    );
}

#[test]
fn digest_path_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = digest_path(
        &dir.path().join("missing.iso"),
        &DigestEngine::default(),
        &CancelToken::new(),
        |_| {},
    )
    .unwrap_err();
    assert!(matches!(err, DigestError::Io { offset: 0, .. }));
}
