//! CLI command handlers, one per file.

mod checksum;
mod compare;
mod completions;
mod verify;

pub use checksum::run_checksum;
pub use compare::run_compare;
pub use completions::{run_completions, run_man};
pub use verify::{exit_code, run_verify};

/// A setup error (unreadable input, bad config) exits with 1.
pub const EXIT_SETUP_ERROR: i32 = 1;
/// Exit code for a run stopped by ctrl-c.
pub const EXIT_CANCELLED: i32 = 130;
