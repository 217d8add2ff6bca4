//! Terminal rendering of pipeline events: stage log on stdout, a throttled
//! progress line on stderr, and the ctrl-c hook.

use hashsig_core::config::HashsigConfig;
use hashsig_core::pipeline::{LogEntry, PipelineObserver};
use hashsig_core::progress::{format_size, ProgressSample};
use hashsig_core::CancelToken;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use super::OutputArgs;

/// Flip `cancel` on the first ctrl-c. Needs a running tokio runtime.
pub fn cancel_on_ctrl_c(cancel: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("ctrl-c received; cancelling");
            cancel.cancel();
        }
    });
}

/// `\r`-rewritten `done / total (pct%)` line on stderr.
pub struct ProgressLine {
    enabled: bool,
    interval: Duration,
    last: Option<Instant>,
    /// A partial line is on screen and needs a newline before other output.
    dirty: bool,
}

impl ProgressLine {
    pub fn new(output: &OutputArgs, cfg: &HashsigConfig) -> Self {
        Self {
            enabled: cfg.show_progress && !output.quiet && !output.json,
            interval: Duration::from_millis(cfg.progress_interval_ms),
            last: None,
            dirty: false,
        }
    }

    pub fn update(&mut self, sample: ProgressSample) {
        if !self.enabled {
            return;
        }
        let now = Instant::now();
        let due = self
            .last
            .map_or(true, |t| now.duration_since(t) >= self.interval);
        if !due && !sample.is_complete() {
            return;
        }
        self.last = Some(now);
        let mut err = io::stderr().lock();
        let _ = write!(err, "\r  {}", render(sample));
        if sample.is_complete() {
            let _ = writeln!(err);
            self.dirty = false;
        } else {
            self.dirty = true;
        }
        let _ = err.flush();
    }

    /// End a partial progress line so the next print starts clean.
    pub fn break_line(&mut self) {
        if self.dirty {
            eprintln!();
            self.dirty = false;
        }
    }
}

pub(crate) fn render(sample: ProgressSample) -> String {
    format!(
        "{} / {} ({:.2}%)",
        format_size(sample.bytes_processed),
        format_size(sample.total_bytes),
        sample.percent()
    )
}

/// Prints log entries as they arrive and drives a `ProgressLine`.
pub struct ConsoleObserver {
    show_log: bool,
    progress: ProgressLine,
}

impl ConsoleObserver {
    pub fn new(output: &OutputArgs, cfg: &HashsigConfig) -> Self {
        Self {
            show_log: !output.quiet && !output.json,
            progress: ProgressLine::new(output, cfg),
        }
    }
}

impl PipelineObserver for ConsoleObserver {
    fn on_log(&mut self, entry: &LogEntry) {
        if self.show_log {
            self.progress.break_line();
            println!("{}", entry);
        }
    }

    fn on_progress(&mut self, sample: ProgressSample) {
        self.progress.update(sample);
    }
}
