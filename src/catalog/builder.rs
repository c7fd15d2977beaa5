//! Turns a parsed row plus a live probe into a [`CatalogEntry`].

use thiserror::Error;
use tracing::{debug, instrument};

use super::entry::{Address, CatalogEntry};
use super::version::extract_version;
use crate::parser::{CsvRow, UrlError, canonicalize_url, is_onion_url};
use crate::probe::{Probe, ProbeError};

/// Why a row did not become an entry.
#[derive(Debug, Error)]
pub enum BuildError {
    /// `url` or `country` column is blank.
    #[error("missing required field '{field}'")]
    MissingRequiredField {
        /// Column name.
        field: &'static str,
    },

    /// URL failed canonicalization.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// The probe itself failed.
    #[error("probe failed for {url}: {source}")]
    ProbeFailed {
        /// Canonical URL.
        url: String,
        /// What the prober reported.
        #[source]
        source: ProbeError,
    },

    /// Onion probing is off for this run; not a failure.
    #[error("skipped onion instance {url}: onion probing disabled")]
    ProbeSkippedOnionDisabled {
        /// Canonical URL.
        url: String,
    },

    /// The instance answered with an empty body.
    #[error("empty response from {url}")]
    EmptyResponse {
        /// Canonical URL.
        url: String,
    },

    /// No `vX.Y.Z` token in the body.
    #[error("no version found in response from {url}")]
    VersionNotFound {
        /// Canonical URL.
        url: String,
    },
}

impl BuildError {
    /// Whether the row was deliberately skipped rather than failed.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::ProbeSkippedOnionDisabled { .. })
    }
}

/// Probes the row's instance and builds its catalog entry.
///
/// The cloudflare column is true only for the exact text `true`.
///
/// # Errors
///
/// Returns a [`BuildError`]; [`BuildError::is_skip`] tells a deliberate
/// onion skip apart from a real failure.
#[instrument(skip(row, probe), fields(url = %row.url))]
pub async fn build_entry(
    row: &CsvRow,
    probe: &dyn Probe,
    onion_disabled: bool,
) -> Result<CatalogEntry, BuildError> {
    if row.url.is_empty() {
        return Err(BuildError::MissingRequiredField { field: "url" });
    }
    if row.country.is_empty() {
        return Err(BuildError::MissingRequiredField { field: "country" });
    }

    let cloudflare = row.cloudflare == "true";
    let url = canonicalize_url(&row.url)?;

    let body = match probe.fetch(&url, onion_disabled).await {
        Ok(body) => body,
        Err(error) if error.is_onion_disabled() => {
            return Err(BuildError::ProbeSkippedOnionDisabled { url });
        }
        Err(source) => return Err(BuildError::ProbeFailed { url, source }),
    };

    if body.is_empty() {
        return Err(BuildError::EmptyResponse { url });
    }

    let Some(version) = extract_version(&body) else {
        return Err(BuildError::VersionNotFound { url });
    };
    debug!(version, "scraped version");

    let version = version.to_string();
    let address = if is_onion_url(&url) {
        Address::Onion(url)
    } else {
        Address::Url(url)
    };

    Ok(CatalogEntry {
        address,
        country: row.country.clone(),
        version,
        cloudflare,
        description: row.description.clone(),
    })
}
