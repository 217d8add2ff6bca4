use clap::Parser;
use hashsig_core::logging;

mod cli;

use crate::cli::{Cli, EXIT_SETUP_ERROR};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible; falls back to stderr.
    let dest = logging::init(cli.verbose);
    tracing::debug!(?dest, "logging ready");

    match cli.run().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("hashsig error: {:#}", err);
            std::process::exit(EXIT_SETUP_ERROR);
        }
    }
}
