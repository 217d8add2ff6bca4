//! CLI for hashsig.

mod commands;
mod console;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use hashsig_core::config::{self, HashsigConfig};
use std::path::PathBuf;

use commands::{run_checksum, run_compare, run_completions, run_man, run_verify};

pub use commands::EXIT_SETUP_ERROR;

/// Top-level CLI for hashsig.
#[derive(Debug, Parser)]
#[command(name = "hashsig", version)]
#[command(
    about = "Verify a download against a checksum file authenticated by a detached OpenPGP signature",
    long_about = None
)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/hashsig/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log detail (-v, -vv). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Inputs of `hashsig verify`.
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Armored public key of the signer.
    #[arg(long, short = 'k', value_name = "PATH")]
    pub key: PathBuf,

    /// Checksum file that was signed (e.g. SHA256SUMS).
    #[arg(long = "hash-file", short = 'H', value_name = "PATH")]
    pub hash_file: PathBuf,

    /// Detached signature over the checksum file (binary or armored).
    #[arg(long, short = 's', value_name = "PATH")]
    pub signature: PathBuf,

    /// File to verify.
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output and hashing knobs shared by commands that hash files.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Bytes per read while hashing (overrides config).
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Only print the final result.
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Verify the signature on a checksum file, then hash FILE and compare.
    Verify(VerifyArgs),

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare two hex digests (whitespace and case ignored).
    Compare {
        first: String,
        second: String,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl Cli {
    /// Run the selected command; returns the process exit code.
    pub async fn run(self) -> Result<i32> {
        match &self.command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Man => return run_man(),
            CliCommand::Compare { first, second } => return Ok(run_compare(first, second)),
            _ => {}
        }

        let cfg = load_config(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Verify(args) => run_verify(args, &cfg).await,
            CliCommand::Checksum { path, output } => run_checksum(path, &output, &cfg).await,
            CliCommand::Compare { .. } | CliCommand::Completions { .. } | CliCommand::Man => Ok(0),
        }
    }
}

/// Explicit `--config` must load; the default location falls back to built-ins.
fn load_config(path: Option<&std::path::Path>) -> Result<HashsigConfig> {
    match path {
        Some(p) => config::load_from_path(p),
        None => Ok(config::load_or_init().unwrap_or_else(|err| {
            tracing::warn!("using default config ({:#})", err);
            HashsigConfig::default()
        })),
    }
}

#[cfg(test)]
mod tests;
