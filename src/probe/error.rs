//! Error types for the probe module.

use thiserror::Error;

/// Errors that can occur while probing an instance.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Nothing to probe.
    #[error("no URL to probe")]
    NoUrl,

    /// The URL does not parse or uses a scheme other than http/https.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// Onion host, but the Tor proxy did not answer.
    #[error("Tor is not running; cannot reach {url}")]
    OnionTransportUnavailable {
        /// The onion URL.
        url: String,
    },

    /// Clearnet host probed over something other than https.
    #[error("clearnet instance must use https: {url}")]
    NonHttpsOnClearnet {
        /// The rejected URL.
        url: String,
    },

    /// Onion host while onion probing is turned off for the run.
    #[error("onion probing disabled; skipping {url}")]
    OnionTransportDisabled {
        /// The onion URL.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build {transport} HTTP client: {source}")]
    ClientBuild {
        /// Which transport failed ("direct" or "tor").
        transport: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level failure (DNS, connect, TLS, timeout, body read).
    #[error("network error probing {url}: {source}")]
    Network {
        /// The probed URL.
        url: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The instance answered with a non-success status.
    #[error("HTTP {status} probing {url}")]
    HttpStatus {
        /// The probed URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
}

impl ProbeError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Whether this is the deliberate "onion probing is off" condition.
    #[must_use]
    pub fn is_onion_disabled(&self) -> bool {
        matches!(self, Self::OnionTransportDisabled { .. })
    }
}
