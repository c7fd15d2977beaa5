//! Input sources and output sinks for a run.

use std::convert::Infallible;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::CatalogDocument;

/// Where the instance list is read from. `-` means standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl InputSource {
    /// Reads the whole list.
    ///
    /// # Errors
    ///
    /// Returns the IO error from the underlying reader.
    pub fn read_to_string(&self) -> io::Result<String> {
        match self {
            Self::Stdin => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
            Self::File(path) => std::fs::read_to_string(path),
        }
    }

    /// The file path, if this source is a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }
}

impl FromStr for InputSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(s))
        })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Where the catalog document is written. `-` means standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output.
    Stdout,
    /// A file on disk, overwritten if present.
    File(PathBuf),
}

impl FromStr for OutputSink {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(s))
        })
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors producing the output document.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The document could not be encoded.
    #[error("cannot serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The encoded document could not be written.
    #[error("cannot write catalog to {target}: {source}")]
    Write {
        /// Display name of the sink.
        target: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Serializes `document` and writes it to `sink` in one call.
///
/// # Errors
///
/// Returns [`OutputError`] when encoding or writing fails.
pub fn write_document(document: &CatalogDocument, sink: &OutputSink) -> Result<(), OutputError> {
    let json = document.to_json_pretty()?;
    let write_error = |source: io::Error| OutputError::Write {
        target: sink.to_string(),
        source,
    };
    match sink {
        OutputSink::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes()).map_err(write_error)?;
            stdout.flush().map_err(write_error)
        }
        OutputSink::File(path) => std::fs::write(path, json).map_err(write_error),
    }
}

/// Whether the import file and the input name the same resource.
#[must_use]
pub fn same_resource(import: &Path, input: &InputSource) -> bool {
    let Some(input) = input.path() else {
        return false;
    };
    match (std::fs::canonicalize(import), std::fs::canonicalize(input)) {
        (Ok(a), Ok(b)) => a == b,
        _ => import == input,
    }
}
