//! Orchestrator: drives the stages in order and builds the `Report`.

use crate::control::CancelToken;
use crate::digest::{self, ByteSource, Digest, DigestEngine, DigestError};
use crate::signature::{PgpBackend, SignatureBackend, SignatureVerifier, VerifiedPayload};
use crate::verdict::Verdict;

use super::inputs::PipelineInputs;
use super::log::{LogEntry, LogStatus};
use super::state::{PipelineState, StageEvent};
use super::{PipelineObserver, Report};

/// Early exit from a stage: the verdict plus the underlying error text.
#[derive(Debug)]
struct Halt {
    verdict: Verdict,
    detail: String,
}

/// Verification pipeline over a signature backend and a digest engine.
#[derive(Debug, Clone)]
pub struct Pipeline<B> {
    verifier: SignatureVerifier<B>,
    engine: DigestEngine,
}

impl Pipeline<PgpBackend> {
    /// Pipeline over the rPGP backend.
    pub fn pgp(engine: DigestEngine) -> Self {
        Self::new(PgpBackend::new(), engine)
    }
}

impl<B: SignatureBackend> Pipeline<B> {
    pub fn new(backend: B, engine: DigestEngine) -> Self {
        Self {
            verifier: SignatureVerifier::new(backend),
            engine,
        }
    }

    /// Run every stage once and return the terminal report.
    ///
    /// Never retries; a failed stage ends the run. `cancel` is checked between
    /// stages and between chunk reads.
    pub fn run<S, O>(
        &self,
        inputs: PipelineInputs<S>,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Report
    where
        S: ByteSource,
        O: PipelineObserver + ?Sized,
    {
        let mut run = Run::new(observer);
        let outcome = run.drive(self, inputs, cancel);
        run.finish(outcome)
    }
}

/// Mutable state of one run.
struct Run<'o, O: ?Sized> {
    state: PipelineState,
    log: Vec<LogEntry>,
    observer: &'o mut O,
    fingerprint: Option<String>,
    expected: Option<Digest>,
    computed: Option<Digest>,
}

impl<'o, O: PipelineObserver + ?Sized> Run<'o, O> {
    fn new(observer: &'o mut O) -> Self {
        Self {
            state: PipelineState::Idle,
            log: Vec::new(),
            observer,
            fingerprint: None,
            expected: None,
            computed: None,
        }
    }

    fn drive<B, S>(
        &mut self,
        pipeline: &Pipeline<B>,
        mut inputs: PipelineInputs<S>,
        cancel: &CancelToken,
    ) -> Result<Verdict, Halt>
    where
        B: SignatureBackend,
        S: ByteSource,
    {
        self.advance(StageEvent::Start);
        self.checkpoint(cancel)?;
        let payload = self.verify_signature(&pipeline.verifier, &inputs)?;

        self.checkpoint(cancel)?;
        let expected = self.extract_digest(&payload, &inputs.hash_file_name)?;

        self.checkpoint(cancel)?;
        let computed = self.hash_target(
            &pipeline.engine,
            &mut inputs.target,
            &inputs.target_name,
            cancel,
        )?;

        self.checkpoint(cancel)?;
        Ok(self.compare(&expected, &computed))
    }

    fn verify_signature<B: SignatureBackend, S>(
        &mut self,
        verifier: &SignatureVerifier<B>,
        inputs: &PipelineInputs<S>,
    ) -> Result<VerifiedPayload, Halt> {
        self.record(LogStatus::Info, "Verifying signature...".to_string());
        match verifier.verify(&inputs.public_key, &inputs.hash_file, &inputs.signature) {
            Ok(payload) => {
                self.record(LogStatus::Success, "Signature verified successfully".to_string());
                self.record(
                    LogStatus::Success,
                    format!("Signature is valid. Fingerprint: {}", payload.fingerprint()),
                );
                self.fingerprint = Some(payload.fingerprint().to_string());
                self.advance(StageEvent::Succeeded);
                Ok(payload)
            }
            Err(failure) => {
                tracing::warn!(%failure, "signature verification failed");
                self.record(
                    LogStatus::Failure,
                    format!("Signature verification failed: {}", failure.verdict()),
                );
                self.advance(StageEvent::Failed);
                Err(Halt {
                    verdict: failure.verdict(),
                    detail: failure.to_string(),
                })
            }
        }
    }

    fn extract_digest(&mut self, payload: &VerifiedPayload, name: &str) -> Result<Digest, Halt> {
        self.record(
            LogStatus::Info,
            format!("Extracting hash from verified file ({})...", name),
        );
        match digest::extract(payload.text()) {
            Ok(expected) => {
                self.record(LogStatus::Success, format!("Extracted hash: {}", expected));
                self.expected = Some(expected.clone());
                self.advance(StageEvent::Succeeded);
                Ok(expected)
            }
            Err(e) => {
                self.record(LogStatus::Failure, "No valid SHA256 hash found".to_string());
                self.advance(StageEvent::Failed);
                Err(Halt {
                    verdict: Verdict::NoDigestFound,
                    detail: e.to_string(),
                })
            }
        }
    }

    fn hash_target<S: ByteSource>(
        &mut self,
        engine: &DigestEngine,
        target: &mut S,
        name: &str,
        cancel: &CancelToken,
    ) -> Result<Digest, Halt> {
        self.record(LogStatus::Info, format!("Calculating file hash for {}...", name));
        tracing::debug!(name, len = target.len(), chunk_size = engine.chunk_size(), "hashing target");

        let observer = &mut *self.observer;
        match engine.compute(target, cancel, |sample| observer.on_progress(sample)) {
            Ok(computed) => {
                self.record(
                    LogStatus::Success,
                    format!("Computed hash for {}: {}", name, computed),
                );
                self.computed = Some(computed.clone());
                self.advance(StageEvent::Succeeded);
                Ok(computed)
            }
            Err(DigestError::Cancelled(_)) => Err(self.cancelled()),
            Err(e) => {
                tracing::warn!(error = %e, name, "hashing failed");
                self.record(LogStatus::Failure, format!("Could not read {}: {}", name, e));
                self.advance(StageEvent::Failed);
                Err(Halt {
                    verdict: Verdict::IoFailure,
                    detail: e.to_string(),
                })
            }
        }
    }

    fn compare(&mut self, expected: &Digest, computed: &Digest) -> Verdict {
        self.record(LogStatus::Info, "Comparing hashes...".to_string());
        if digest::equal(expected.as_hex(), computed.as_hex()) {
            self.record(LogStatus::Success, "Hashes match - file is legitimate".to_string());
            self.advance(StageEvent::DigestsMatched);
            Verdict::DigestsMatch
        } else {
            self.record(
                LogStatus::Failure,
                format!(
                    "Hashes do not match (expected {}, computed {})",
                    expected, computed
                ),
            );
            self.advance(StageEvent::DigestsDiffered);
            Verdict::DigestsMismatch
        }
    }

    fn checkpoint(&mut self, cancel: &CancelToken) -> Result<(), Halt> {
        if cancel.is_cancelled() {
            return Err(self.cancelled());
        }
        Ok(())
    }

    fn cancelled(&mut self) -> Halt {
        self.record(LogStatus::Failure, "Verification cancelled".to_string());
        self.advance(StageEvent::Cancelled);
        Halt {
            verdict: Verdict::Cancelled,
            detail: "cancelled by user".to_string(),
        }
    }

    fn record(&mut self, status: LogStatus, message: String) {
        let entry = LogEntry {
            stage: self.state,
            status,
            message,
        };
        self.observer.on_log(&entry);
        self.log.push(entry);
    }

    fn advance(&mut self, event: StageEvent) {
        match self.state.advance(event) {
            Ok(next) => {
                tracing::debug!(from = %self.state, to = %next, "pipeline transition");
                self.state = next;
                self.observer.on_state(next);
            }
            Err(err) => {
                // Stage order is fixed above; reaching this is a bug.
                debug_assert!(false, "{}", err);
                tracing::error!(%err, "ignored pipeline transition");
            }
        }
    }

    fn finish(self, outcome: Result<Verdict, Halt>) -> Report {
        let (verdict, detail) = match outcome {
            Ok(verdict) => (verdict, None),
            Err(halt) => (halt.verdict, Some(halt.detail)),
        };
        if !self.state.is_terminal() {
            debug_assert!(false, "run ended in non-terminal state {}", self.state);
            tracing::error!(state = %self.state, "run ended in non-terminal state");
        }
        tracing::info!(?verdict, state = %self.state, "verification finished");
        Report {
            state: self.state,
            verdict,
            log: self.log,
            fingerprint: self.fingerprint,
            expected: self.expected,
            computed: self.computed,
            detail,
        }
    }
}
