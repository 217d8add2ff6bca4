//! Pipeline state machine.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    VerifyingSignature,
    ExtractingDigest,
    HashingFile,
    Comparing,
    Matched,
    Mismatched,
    SignatureFailed,
    ExtractionFailed,
    HashingFailed,
    Cancelled,
}

/// What happened in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// All inputs supplied; leave `Idle`.
    Start,
    Succeeded,
    Failed,
    DigestsMatched,
    DigestsDiffered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal pipeline transition from {from:?} on {event:?}")]
pub struct InvalidTransition {
    pub from: PipelineState,
    pub event: StageEvent,
}

impl PipelineState {
    /// States in which a stage is running.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            PipelineState::VerifyingSignature
                | PipelineState::ExtractingDigest
                | PipelineState::HashingFile
                | PipelineState::Comparing
        )
    }

    pub fn is_terminal(self) -> bool {
        !self.is_active() && self != PipelineState::Idle
    }

    /// Next state for `event`, or `InvalidTransition` if the pair is not allowed.
    pub fn advance(self, event: StageEvent) -> Result<PipelineState, InvalidTransition> {
        use PipelineState::*;
        let next = match (self, event) {
            (Idle, StageEvent::Start) => VerifyingSignature,
            (VerifyingSignature, StageEvent::Succeeded) => ExtractingDigest,
            (VerifyingSignature, StageEvent::Failed) => SignatureFailed,
            (ExtractingDigest, StageEvent::Succeeded) => HashingFile,
            (ExtractingDigest, StageEvent::Failed) => ExtractionFailed,
            (HashingFile, StageEvent::Succeeded) => Comparing,
            (HashingFile, StageEvent::Failed) => HashingFailed,
            (Comparing, StageEvent::DigestsMatched) => Matched,
            (Comparing, StageEvent::DigestsDiffered) => Mismatched,
            (state, StageEvent::Cancelled) if state.is_active() => Cancelled,
            (from, event) => return Err(InvalidTransition { from, event }),
        };
        Ok(next)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::Idle => "idle",
            PipelineState::VerifyingSignature => "verifying signature",
            PipelineState::ExtractingDigest => "extracting digest",
            PipelineState::HashingFile => "hashing file",
            PipelineState::Comparing => "comparing",
            PipelineState::Matched => "matched",
            PipelineState::Mismatched => "mismatched",
            PipelineState::SignatureFailed => "signature failed",
            PipelineState::ExtractionFailed => "extraction failed",
            PipelineState::HashingFailed => "hashing failed",
            PipelineState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}
