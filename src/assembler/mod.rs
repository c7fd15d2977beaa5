//! Catalog assembly: one run from instance list to document.
//!
//! A run walks these steps in order:
//!
//! 1. source check: import file and input must differ
//! 2. dependency check: both probe transports must build ([`run_catalog`] only)
//! 3. optional import of onion entries from a prior snapshot; importing turns
//!    onion probing off for the rest of the run
//! 4. Tor auto-detection: when onion probing is still on but the proxy does
//!    not answer, onion rows are skipped
//! 5. read every row, then per row: parse, build, classify as OK, SKIPPED,
//!    or FAILED
//! 6. assemble probed entries (row order) followed by imported entries
//!
//! A malformed row aborts the run. In fail-fast mode the first FAILED row
//! aborts the loop and no document is produced.

mod error;
mod io;

pub use error::RunError;
pub use io::{InputSource, OutputError, OutputSink, same_resource, write_document};

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::catalog::{
    BuildError, CatalogDocument, CatalogEntry, ImportedEntry, build_entry, load_onion_entries,
};
use crate::parser::{CsvRow, DEFAULT_DELIMITER};
use crate::probe::{HttpProber, Probe, ProbeConfig};

/// What the caller asked for.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Instance list.
    pub input: InputSource,
    /// Prior snapshot whose onion entries are carried over.
    pub import: Option<PathBuf>,
    /// Never probe onion instances.
    pub no_tor: bool,
    /// Abort on the first failed row.
    pub fail_fast: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input: InputSource::Stdin,
            import: None,
            no_tor: false,
            fail_fast: false,
        }
    }
}

/// Classification of a single row.
#[derive(Debug)]
pub enum RowOutcome {
    /// Entry built.
    Ok(CatalogEntry),
    /// Onion row while onion probing is off.
    Skipped {
        /// URL as listed.
        url: String,
    },
    /// Anything else that kept the row out of the catalog.
    Failed {
        /// URL as listed.
        url: String,
        /// Why.
        error: BuildError,
    },
}

impl RowOutcome {
    /// Maps a build result onto the three outcomes.
    #[must_use]
    pub fn classify(row: &CsvRow, result: Result<CatalogEntry, BuildError>) -> Self {
        match result {
            Ok(entry) => Self::Ok(entry),
            Err(error) if error.is_skip() => Self::Skipped {
                url: row.url.clone(),
            },
            Err(error) => Self::Failed {
                url: row.url.clone(),
                error,
            },
        }
    }
}

/// Result of a run that was not aborted by a [`RunError`].
#[derive(Debug)]
pub struct RunReport {
    /// The document to write; `None` when fail-fast aborted the run.
    pub document: Option<CatalogDocument>,
    /// Rows that became entries.
    pub ok: usize,
    /// Entries carried over from the import.
    pub imported: usize,
    /// URLs of skipped onion rows.
    pub skipped: Vec<String>,
    /// URLs of failed rows.
    pub failed: Vec<String>,
}

impl RunReport {
    /// Whether fail-fast stopped the run.
    #[must_use]
    pub fn aborted(&self) -> bool {
        self.document.is_none()
    }
}

/// Drives rows through the Entry Builder.
pub struct Assembler<'a> {
    probe: &'a dyn Probe,
    onion_disabled: bool,
    fail_fast: bool,
    delimiter: char,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler over `probe`.
    #[must_use]
    pub fn new(probe: &'a dyn Probe, onion_disabled: bool, fail_fast: bool) -> Self {
        Self {
            probe,
            onion_disabled,
            fail_fast,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Processes every row of `input` and assembles the document.
    ///
    /// Blank lines between records are ignored. A record whose quoted span
    /// or escape is still open at a newline continues on the next line.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Parse`] on the first row that is malformed or does
    /// not carry 3 or 4 fields. `line` is where that record starts.
    pub async fn assemble(
        &self,
        input: &str,
        imported: Vec<ImportedEntry>,
        updated: NaiveDate,
    ) -> Result<RunReport, RunError> {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();

        let mut lines = input.lines().enumerate();
        while let Some((index, first)) = lines.next() {
            if first.trim().is_empty() {
                continue;
            }
            let line = index + 1;
            // A quoted span or escape may carry the record over newlines
            let mut record = first.to_string();
            let row = loop {
                match CsvRow::parse(&record, self.delimiter) {
                    Err(source) if source.is_incomplete() => {
                        let Some((_, next)) = lines.next() else {
                            return Err(RunError::Parse { line, source });
                        };
                        record.push('\n');
                        record.push_str(next);
                    }
                    parsed => break parsed.map_err(|source| RunError::Parse { line, source })?,
                }
            };

            let result = build_entry(&row, self.probe, self.onion_disabled).await;
            match RowOutcome::classify(&row, result) {
                RowOutcome::Ok(entry) => {
                    info!(url = %row.url, version = %entry.version, "OK");
                    entries.push(entry);
                }
                RowOutcome::Skipped { url } => {
                    info!(url = %url, "SKIPPED (onion probing disabled)");
                    skipped.push(url);
                }
                RowOutcome::Failed { url, error } => {
                    warn!(url = %url, error = %error, "FAILED");
                    failed.push(url);
                    if self.fail_fast {
                        warn!("fail-fast set; aborting run without output");
                        return Ok(RunReport {
                            document: None,
                            ok: entries.len(),
                            imported: imported.len(),
                            skipped,
                            failed,
                        });
                    }
                }
            }
        }

        let ok = entries.len();
        let imported_count = imported.len();
        Ok(RunReport {
            document: Some(CatalogDocument::assemble(updated, entries, imported)),
            ok,
            imported: imported_count,
            skipped,
            failed,
        })
    }
}

/// Runs every step after the dependency check against an existing probe.
///
/// # Errors
///
/// Returns [`RunError`] for conflicting sources, a bad import, unreadable
/// input, or a malformed row.
pub async fn run_with_probe(
    options: &RunOptions,
    probe: &dyn Probe,
) -> Result<RunReport, RunError> {
    check_sources(options)?;
    run_checked(options, probe).await
}

/// Full run: source check, dependency check, then the remaining steps.
///
/// # Errors
///
/// Returns [`RunError::MissingDependency`] when the probe clients cannot be
/// built, plus everything [`run_with_probe`] returns.
pub async fn run_catalog(
    options: &RunOptions,
    config: &ProbeConfig,
) -> Result<RunReport, RunError> {
    check_sources(options)?;
    let prober = HttpProber::new(config).map_err(RunError::MissingDependency)?;
    run_checked(options, &prober).await
}

async fn run_checked(options: &RunOptions, probe: &dyn Probe) -> Result<RunReport, RunError> {
    let mut onion_disabled = options.no_tor;
    let imported = match &options.import {
        Some(path) => {
            let entries = load_onion_entries(path)?;
            onion_disabled = true;
            entries
        }
        None => Vec::new(),
    };

    if !onion_disabled && !probe.onion_transport_ready().await {
        info!("Tor proxy not reachable; onion instances will be skipped");
        onion_disabled = true;
    }
    debug!(onion_disabled, fail_fast = options.fail_fast, "run configured");

    let input = options
        .input
        .read_to_string()
        .map_err(|source| RunError::Input {
            source_name: options.input.to_string(),
            source,
        })?;

    let report = Assembler::new(probe, onion_disabled, options.fail_fast)
        .assemble(&input, imported, Utc::now().date_naive())
        .await?;

    info!(
        ok = report.ok,
        imported = report.imported,
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Catalog assembled"
    );
    Ok(report)
}

fn check_sources(options: &RunOptions) -> Result<(), RunError> {
    if let Some(import) = &options.import
        && same_resource(import, &options.input)
    {
        return Err(RunError::ConflictingSources {
            path: import.clone(),
        });
    }
    Ok(())
}
