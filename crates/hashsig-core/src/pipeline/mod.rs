//! Verification pipeline: signature → digest extraction → hashing → comparison.
//!
//! Each run starts in `Idle`, walks the stages strictly in order and stops at
//! the first failure. The caller gets one `Report` with the terminal state,
//! the verdict and the ordered stage log. Progress and log entries are pushed
//! to a caller-supplied `PipelineObserver` while the run is in flight.

mod inputs;
mod log;
mod run;
mod state;

use serde::Serialize;

use crate::digest::Digest;
use crate::progress::ProgressSample;
use crate::verdict::Verdict;

pub use inputs::PipelineInputs;
pub use log::{LogEntry, LogStatus};
pub use run::Pipeline;
pub use state::{InvalidTransition, PipelineState, StageEvent};

/// Receives pipeline events as they happen. All methods default to no-ops.
///
/// Calls happen on the thread running the pipeline; a slow observer stalls it.
pub trait PipelineObserver {
    fn on_state(&mut self, _state: PipelineState) {}
    fn on_log(&mut self, _entry: &LogEntry) {}
    fn on_progress(&mut self, _sample: ProgressSample) {}
}

impl PipelineObserver for () {}

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub state: PipelineState,
    pub verdict: Verdict,
    pub log: Vec<LogEntry>,
    pub fingerprint: Option<String>,
    pub expected: Option<Digest>,
    pub computed: Option<Digest>,
    /// Underlying error text for failed runs.
    pub detail: Option<String>,
}
