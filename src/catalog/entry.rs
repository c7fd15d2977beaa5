//! Catalog entry types and their JSON shape.

use serde::Serialize;

/// Where an instance is reached; serialized as either a `url` or an `onion` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Address {
    /// Clearnet instance.
    Url(String),
    /// Onion service.
    Onion(String),
}

impl Address {
    /// The address string regardless of network.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(url) | Self::Onion(url) => url,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One probed instance as it appears in `instances`.
///
/// `cloudflare` is only written when true and `description` only when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// `url` or `onion` key.
    #[serde(flatten)]
    pub address: Address,
    /// Two-letter country code.
    pub country: String,
    /// Scraped `vX.Y.Z` version.
    pub version: String,
    /// Whether the instance sits behind Cloudflare.
    #[serde(skip_serializing_if = "is_false")]
    pub cloudflare: bool,
    /// Free-form description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}
