//! Exit code logic for a catalog run.
//!
//! Single responsibility: map a run report to the process exit outcome.

use catalog_core::RunReport;

use crate::ProcessExit;

/// Determines the process exit outcome from a finished run.
///
/// Skipped onion rows never affect the outcome.
pub(crate) fn determine_exit_outcome(report: &RunReport) -> ProcessExit {
    if report.aborted() || !report.failed.is_empty() {
        ProcessExit::Partial
    } else {
        ProcessExit::Success
    }
}
