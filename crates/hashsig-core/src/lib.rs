//! hashsig core: prove a download matches a checksum that was authenticated by
//! a detached OpenPGP signature.
//!
//! The pieces are usable on their own (`digest` for chunked hashing and
//! comparison, `signature` for verification) and are chained by `pipeline`.

pub mod config;
pub mod control;
pub mod digest;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod signature;
pub mod verdict;

pub use control::{CancelToken, Cancelled};
pub use pipeline::{Pipeline, PipelineInputs, PipelineObserver, PipelineState, Report};
pub use verdict::Verdict;
