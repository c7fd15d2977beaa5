//! Errors that abort a whole run.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::ImportError;
use crate::parser::CsvError;
use crate::probe::ProbeError;

/// Conditions that stop a run before any output is produced.
#[derive(Debug, Error)]
pub enum RunError {
    /// Import file and input are the same resource.
    #[error("import file {path} is also the input; pass different files")]
    ConflictingSources {
        /// The shared path.
        path: PathBuf,
    },

    /// The probing stack could not be set up.
    #[error("missing dependency: {0}")]
    MissingDependency(#[source] ProbeError),

    /// The prior snapshot could not be imported.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// The instance list could not be read.
    #[error("cannot read input {source_name}: {source}")]
    Input {
        /// Display name of the input.
        source_name: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A row is structurally malformed.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number in the input.
        line: usize,
        /// What the row parser reported.
        #[source]
        source: CsvError,
    },
}
