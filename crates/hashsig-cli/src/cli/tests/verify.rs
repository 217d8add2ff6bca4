//! Tests for `hashsig verify` parsing and verdict exit codes.

use super::parse;
use crate::cli::commands::{exit_code, EXIT_CANCELLED, EXIT_SETUP_ERROR};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use hashsig_core::Verdict;
use std::path::PathBuf;

#[test]
fn cli_parse_verify() {
    match parse(&[
        "hashsig",
        "verify",
        "--key",
        "release.asc",
        "--hash-file",
        "SHA256SUMS",
        "--signature",
        "SHA256SUMS.sig",
        "debian.iso",
    ]) {
        CliCommand::Verify(args) => {
            assert_eq!(args.key, PathBuf::from("release.asc"));
            assert_eq!(args.hash_file, PathBuf::from("SHA256SUMS"));
            assert_eq!(args.signature, PathBuf::from("SHA256SUMS.sig"));
            assert_eq!(args.file, PathBuf::from("debian.iso"));
            assert!(args.output.chunk_size.is_none());
            assert!(!args.output.json);
            assert!(!args.output.quiet);
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_verify_short_flags() {
    match parse(&[
        "hashsig", "verify", "-k", "k.asc", "-H", "SUMS", "-s", "SUMS.asc", "-q", "--json",
        "--chunk-size", "4096", "f.bin",
    ]) {
        CliCommand::Verify(args) => {
            assert_eq!(args.output.chunk_size, Some(4096));
            assert!(args.output.json);
            assert!(args.output.quiet);
            assert_eq!(args.signature, PathBuf::from("SUMS.asc"));
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_verify_requires_all_inputs() {
    let err = Cli::try_parse_from(["hashsig", "verify", "--key", "k.asc", "f.bin"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn verdict_exit_codes_are_distinct() {
    let verdicts = [
        Verdict::DigestsMatch,
        Verdict::DigestsMismatch,
        Verdict::SignatureInvalid,
        Verdict::MalformedInput,
        Verdict::NoDigestFound,
        Verdict::IoFailure,
        Verdict::Cancelled,
    ];
    let mut codes: Vec<i32> = verdicts.iter().map(|v| exit_code(*v)).collect();
    assert_eq!(codes[0], 0);
    assert_eq!(exit_code(Verdict::Cancelled), EXIT_CANCELLED);
    // 1 is setup errors, 2 is clap usage errors.
    assert!(!codes.contains(&EXIT_SETUP_ERROR));
    assert!(!codes.contains(&2));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), verdicts.len());
}
