//! Ordered, human-readable record of stage transitions.

use serde::Serialize;
use std::fmt;

use super::state::PipelineState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Info,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Stage that was active when the entry was written.
    pub stage: PipelineState,
    pub status: LogStatus,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.status {
            LogStatus::Info => "..",
            LogStatus::Success => "ok",
            LogStatus::Failure => "!!",
        };
        write!(f, "[{}] {}", mark, self.message)
    }
}
