//! CLI entry point for the instance catalog tool.

use std::process::ExitCode;

mod app;
mod cli;

/// Process exit outcome; see `--help` for the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every row probed or cleanly skipped, output written.
    Success,
    /// Some rows failed, fail-fast aborted, or output could not be written.
    Partial,
    /// Malformed input, bad configuration, or missing dependencies.
    Fatal,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Fatal => 2,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let exit = app::runtime::run_instance_catalog().await;
    ExitCode::from(exit.code())
}
