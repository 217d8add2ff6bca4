//! `hashsig verify` – signature, extraction, hashing and comparison in one run.

use anyhow::{Context, Result};
use hashsig_core::config::HashsigConfig;
use hashsig_core::digest::DigestEngine;
use hashsig_core::{CancelToken, Pipeline, PipelineInputs, Report, Verdict};

use super::EXIT_CANCELLED;
use crate::cli::console::{self, ConsoleObserver};
use crate::cli::{OutputArgs, VerifyArgs};

/// Process exit code for a verdict.
pub fn exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::DigestsMatch => 0,
        Verdict::DigestsMismatch => 3,
        Verdict::SignatureInvalid => 4,
        Verdict::MalformedInput => 5,
        Verdict::NoDigestFound => 6,
        Verdict::IoFailure => 7,
        Verdict::Cancelled => EXIT_CANCELLED,
    }
}

pub async fn run_verify(args: VerifyArgs, cfg: &HashsigConfig) -> Result<i32> {
    let inputs = PipelineInputs::from_paths(&args.key, &args.hash_file, &args.signature, &args.file)?;
    let engine = DigestEngine::new(args.output.chunk_size.unwrap_or(cfg.chunk_size));
    let mut observer = ConsoleObserver::new(&args.output, cfg);

    let cancel = CancelToken::new();
    console::cancel_on_ctrl_c(cancel.clone());

    tracing::info!(
        target_file = %args.file.display(),
        hash_file = %args.hash_file.display(),
        "starting verification"
    );
    let report = tokio::task::spawn_blocking(move || {
        Pipeline::pgp(engine).run(inputs, &cancel, &mut observer)
    })
    .await
    .context("verification task join")?;

    print_report(&report, &args.output)?;
    Ok(exit_code(report.verdict))
}

fn print_report(report: &Report, output: &OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    if output.quiet {
        println!("{}", report.verdict);
        return Ok(());
    }
    if let Some(fp) = &report.fingerprint {
        println!("  Signer:   {}", fp);
    }
    if let Some(expected) = &report.expected {
        println!("  Expected: {}", expected);
    }
    if let Some(computed) = &report.computed {
        println!("  Computed: {}", computed);
    }
    println!("{}", report.verdict);
    if let Some(detail) = &report.detail {
        if !report.verdict.is_success() {
            eprintln!("  ({})", detail);
        }
    }
    Ok(())
}
