//! Logging init: file under the XDG state dir, or stderr when that fails.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log lines ended up after `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Stderr,
}

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

/// Default filter for a verbosity level; `RUST_LOG` always wins.
///
/// The file log is detailed by default. The stderr fallback stays at `warn`
/// unless raised so it does not drown the report.
pub fn default_filter(verbose: u8, to_file: bool) -> &'static str {
    match (verbose, to_file) {
        (0, false) => "warn",
        (0, true) | (1, _) => "info,hashsig_core=debug,hashsig=debug",
        _ => "trace",
    }
}

fn env_filter(verbose: u8, to_file: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, to_file)))
}

/// `~/.local/state/hashsig/hashsig.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hashsig")?;
    Ok(xdg_dirs.get_state_home().join("hashsig.log"))
}

/// Initialize structured logging to the XDG state log file.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging(verbose: u8) -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, true))
        .with_writer(BoxMakeWriter::new(FileMakeWriter(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber: {}", e))?;

    tracing::info!("hashsig logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only (no file). Use when `init_logging()` fails.
pub fn init_logging_stderr(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, false))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Log to the state file, or to stderr if the file cannot be set up.
pub fn init(verbose: u8) -> LogDestination {
    match init_logging(verbose) {
        Ok(path) => LogDestination::File(path),
        Err(err) => {
            init_logging_stderr(verbose);
            tracing::warn!("file logging unavailable ({:#}); logging to stderr", err);
            LogDestination::Stderr
        }
    }
}
