//! End-to-end pipeline runs over real gpg fixtures and on-disk targets.

mod common;

use hashsig_core::digest::{DigestEngine, FileSource};
use hashsig_core::pipeline::{LogEntry, PipelineObserver};
use hashsig_core::progress::ProgressSample;
use hashsig_core::{CancelToken, Pipeline, PipelineInputs, PipelineState, Report, Verdict};
use tempfile::tempdir;

#[derive(Default)]
struct Collect {
    log: Vec<LogEntry>,
    progress: Vec<ProgressSample>,
}

impl PipelineObserver for Collect {
    fn on_log(&mut self, entry: &LogEntry) {
        self.log.push(entry.clone());
    }

    fn on_progress(&mut self, sample: ProgressSample) {
        self.progress.push(sample);
    }
}

fn run(key: &str, hash_file: &str, sig: &str, target: &[u8], chunk: usize) -> (Report, Collect) {
    let dir = tempdir().unwrap();
    let target_path = common::write_target(dir.path(), target);
    let inputs = PipelineInputs::from_paths(
        &common::fixture(key),
        &common::fixture(hash_file),
        &common::fixture(sig),
        &target_path,
    )
    .unwrap();
    let mut observer = Collect::default();
    let report = Pipeline::pgp(DigestEngine::new(chunk)).run(inputs, &CancelToken::new(), &mut observer);
    (report, observer)
}

fn has_message(report: &Report, prefix: &str) -> bool {
    report.log.iter().any(|e| e.message.starts_with(prefix))
}

#[test]
fn signed_checksum_and_matching_file() {
    let (report, observer) = run(
        "release-key.asc",
        "SHA256SUMS",
        "SHA256SUMS.sig",
        &common::target_bytes(),
        256 * 1024,
    );

    assert_eq!(report.verdict, Verdict::DigestsMatch);
    assert_eq!(report.state, PipelineState::Matched);
    assert_eq!(report.fingerprint.as_deref(), Some(common::RELEASE_FINGERPRINT));
    assert_eq!(report.expected.as_ref().unwrap().as_hex(), common::TARGET_DIGEST);
    assert_eq!(report.computed.as_ref().unwrap().as_hex(), common::TARGET_DIGEST);
    assert!(has_message(&report, "Extracting hash from verified file (SHA256SUMS)..."));
    assert!(has_message(&report, "Calculating file hash for target.bin..."));

    // 600 KiB in 256 KiB chunks.
    let done: Vec<u64> = observer.progress.iter().map(|s| s.bytes_processed).collect();
    assert_eq!(done, vec![262_144, 524_288, 614_400]);
    assert_eq!(observer.log, report.log);
}

#[test]
fn armored_signature_matches_too() {
    let (report, _) = run(
        "release-key.asc",
        "SHA256SUMS",
        "SHA256SUMS.asc",
        &common::target_bytes(),
        100_000,
    );
    assert_eq!(report.verdict, Verdict::DigestsMatch);
}

#[test]
fn flipped_byte_in_target_mismatches() {
    let mut target = common::target_bytes();
    target[300_000] ^= 0x80;
    let (report, _) = run("release-key.asc", "SHA256SUMS", "SHA256SUMS.sig", &target, 64 * 1024);

    assert_eq!(report.verdict, Verdict::DigestsMismatch);
    assert_eq!(report.state, PipelineState::Mismatched);
    let expected = report.expected.as_ref().unwrap();
    let computed = report.computed.as_ref().unwrap();
    assert_ne!(expected, computed);
    let last = &report.log.last().unwrap().message;
    assert!(last.contains(expected.as_hex()) && last.contains(computed.as_hex()));
}

#[test]
fn signature_by_other_key_stops_the_run() {
    let (report, observer) = run(
        "release-key.asc",
        "SHA256SUMS",
        "SHA256SUMS.other.sig",
        &common::target_bytes(),
        256 * 1024,
    );

    assert_eq!(report.verdict, Verdict::SignatureInvalid);
    assert_eq!(report.state, PipelineState::SignatureFailed);
    assert!(!has_message(&report, "Extracting hash"));
    assert!(!has_message(&report, "Calculating file hash"));
    assert!(observer.progress.is_empty());
}

#[test]
fn signed_file_without_digest_skips_hashing() {
    let (report, observer) = run(
        "release-key.asc",
        "NOTES",
        "NOTES.sig",
        &common::target_bytes(),
        256 * 1024,
    );

    assert_eq!(report.verdict, Verdict::NoDigestFound);
    assert_eq!(report.state, PipelineState::ExtractionFailed);
    assert!(has_message(&report, "Signature is valid. Fingerprint:"));
    assert!(!has_message(&report, "Calculating file hash"));
    assert!(observer.progress.is_empty());
}

#[test]
fn signature_file_passed_as_key_is_malformed() {
    let (report, _) = run(
        "SHA256SUMS.asc",
        "SHA256SUMS",
        "SHA256SUMS.sig",
        &common::target_bytes(),
        256 * 1024,
    );
    assert_eq!(report.verdict, Verdict::MalformedInput);
    assert_eq!(report.state, PipelineState::SignatureFailed);
}

#[test]
fn empty_target_hashes_to_empty_digest() {
    let (report, observer) = run(
        "release-key.asc",
        "SHA256SUMS",
        "SHA256SUMS.sig",
        &[],
        256 * 1024,
    );
    assert_eq!(report.verdict, Verdict::DigestsMismatch);
    assert_eq!(
        report.computed.as_ref().unwrap().as_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(observer.progress, vec![ProgressSample::new(0, 0)]);
}

#[test]
fn from_paths_reports_missing_inputs() {
    let dir = tempdir().unwrap();
    let err = PipelineInputs::<FileSource>::from_paths(
        &common::fixture("release-key.asc"),
        &dir.path().join("SHA256SUMS"),
        &common::fixture("SHA256SUMS.sig"),
        &common::fixture("NOTES"),
    )
    .unwrap_err();
    assert!(format!("{:#}", err).contains("read hash file"));
}
