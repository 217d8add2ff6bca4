//! Progress samples emitted by the digest engine (bytes hashed, total bytes).
//!
//! Consumers can render `fraction()` as a bar and `format_size` for the
//! human-readable `done / total` line.

use serde::Serialize;

/// One progress report: `bytes_processed` of `total_bytes` absorbed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSample {
    pub bytes_processed: u64,
    pub total_bytes: u64,
}

impl ProgressSample {
    pub fn new(bytes_processed: u64, total_bytes: u64) -> Self {
        Self {
            bytes_processed,
            total_bytes,
        }
    }

    /// Fraction complete in [0.0, 1.0]. An empty source counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        (self.bytes_processed as f64 / self.total_bytes as f64).min(1.0)
    }

    /// Percent complete, rounded to two decimals.
    pub fn percent(&self) -> f64 {
        (self.fraction() * 10_000.0).round() / 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.bytes_processed >= self.total_bytes
    }
}

/// Formats a byte count with a 1024 base and two decimals, e.g. `1.50 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}
