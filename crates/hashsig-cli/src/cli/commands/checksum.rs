//! `hashsig checksum` – compute SHA-256 of a file.

use anyhow::{Context, Result};
use hashsig_core::config::HashsigConfig;
use hashsig_core::digest::{self, DigestEngine, DigestError};
use hashsig_core::CancelToken;
use std::path::PathBuf;

use super::EXIT_CANCELLED;
use crate::cli::console::{self, ProgressLine};
use crate::cli::OutputArgs;

/// Compute and print SHA-256 of the given file.
pub async fn run_checksum(path: PathBuf, output: &OutputArgs, cfg: &HashsigConfig) -> Result<i32> {
    let engine = DigestEngine::new(output.chunk_size.unwrap_or(cfg.chunk_size));
    let mut progress = ProgressLine::new(output, cfg);
    let cancel = CancelToken::new();
    console::cancel_on_ctrl_c(cancel.clone());

    let result = tokio::task::spawn_blocking({
        let path = path.clone();
        move || digest::digest_path(&path, &engine, &cancel, |s| progress.update(s))
    })
    .await
    .context("checksum task join")?;

    let digest = match result {
        Ok(d) => d,
        Err(DigestError::Cancelled(_)) => {
            eprintln!("Checksum cancelled");
            return Ok(EXIT_CANCELLED);
        }
        Err(e) => return Err(e).with_context(|| format!("hash {}", path.display())),
    };

    if output.json {
        let out = serde_json::json!({
            "path": path.display().to_string(),
            "sha256": digest.as_hex(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}  {}", digest, path.display());
    }
    Ok(0)
}
