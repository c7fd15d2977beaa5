//! The catalog document and import of onion entries from a prior snapshot.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use super::entry::CatalogEntry;

/// An entry copied verbatim from a prior snapshot, key order preserved.
pub type ImportedEntry = Map<String, Value>;

/// One element of `instances`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogInstance {
    /// Built from a freshly probed row.
    Probed(CatalogEntry),
    /// Carried over from an imported snapshot.
    Imported(ImportedEntry),
}

/// `{ "updated": "YYYY-MM-DD", "instances": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDocument {
    /// Generation date (UTC), ISO-8601 calendar form.
    pub updated: String,
    /// Probed entries in row order, then imported entries in source order.
    pub instances: Vec<CatalogInstance>,
}

impl CatalogDocument {
    /// Assembles a document from probed and imported entries.
    #[must_use]
    pub fn assemble(
        updated: NaiveDate,
        probed: Vec<CatalogEntry>,
        imported: Vec<ImportedEntry>,
    ) -> Self {
        let instances = probed
            .into_iter()
            .map(CatalogInstance::Probed)
            .chain(imported.into_iter().map(CatalogInstance::Imported))
            .collect();
        Self {
            updated: updated.format("%Y-%m-%d").to_string(),
            instances,
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the document cannot be encoded.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Errors reading a prior snapshot for import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The snapshot file could not be read.
    #[error("cannot read import file {path}: {source}")]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON.
    #[error("import file {path} is not valid JSON: {source}")]
    Malformed {
        /// Snapshot path.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot has no `instances` array.
    #[error("import file {path} has no 'instances' array")]
    MissingInstances {
        /// Snapshot path.
        path: PathBuf,
    },
}

/// Reads `path` and returns its onion entries in source order.
///
/// # Errors
///
/// Returns [`ImportError`] when the file is unreadable or malformed.
pub fn load_onion_entries(path: &Path) -> Result<Vec<ImportedEntry>, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = extract_onion_entries(path, &text)?;
    info!(path = %path.display(), count = entries.len(), "Imported onion entries");
    Ok(entries)
}

/// Picks the entries carrying a non-empty `onion` string out of a snapshot.
///
/// # Errors
///
/// Returns [`ImportError::Malformed`] or [`ImportError::MissingInstances`].
pub fn extract_onion_entries(path: &Path, text: &str) -> Result<Vec<ImportedEntry>, ImportError> {
    let document: Value = serde_json::from_str(text).map_err(|source| ImportError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(instances) = document.get("instances").and_then(Value::as_array) else {
        return Err(ImportError::MissingInstances {
            path: path.to_path_buf(),
        });
    };

    let entries: Vec<ImportedEntry> = instances
        .iter()
        .filter_map(Value::as_object)
        .filter(|entry| {
            entry
                .get("onion")
                .and_then(Value::as_str)
                .is_some_and(|onion| !onion.is_empty())
        })
        .cloned()
        .collect();

    debug!(total = instances.len(), onion = entries.len(), "filtered snapshot");
    Ok(entries)
}
