//! URL canonicalization and onion address detection.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::error::UrlError;

/// Top-level label reserved for Tor onion services.
pub const ONION_TLD: &str = "onion";

/// `scheme://host[:port][/path]` over lowercase input.
#[allow(clippy::expect_used)]
static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<scheme>[a-z][a-z0-9+.-]*)://(?P<host>[a-z0-9._~-]+(?::[0-9]+)?)(?P<path>/.*)?$")
        .expect("URL shape regex is valid") // Static pattern, safe to panic
});

/// Normalizes an instance URL.
///
/// The whole string is lowercased, checked against `scheme://host[/path]`,
/// and a path made only of slashes is dropped. Any other path is kept as is.
/// Internationalized hosts are not supported and must be punycode already.
///
/// # Errors
///
/// Returns [`UrlError::EmptyInput`] for an empty string and
/// [`UrlError::InvalidShape`] when the shape check fails.
///
/// # Examples
///
/// ```
/// use catalog_core::parser::canonicalize_url;
///
/// assert_eq!(canonicalize_url("HTTPS://Example.com//").unwrap(), "https://example.com");
/// assert_eq!(canonicalize_url("https://example.com/r/").unwrap(), "https://example.com/r/");
/// ```
pub fn canonicalize_url(raw: &str) -> Result<String, UrlError> {
    if raw.is_empty() {
        return Err(UrlError::EmptyInput);
    }

    let lowered = raw.to_lowercase();
    let Some(captures) = URL_SHAPE.captures(&lowered) else {
        debug!(url = raw, "URL failed shape check");
        return Err(UrlError::InvalidShape {
            url: raw.to_string(),
        });
    };

    let root_only = captures
        .name("path")
        .is_none_or(|path| path.as_str().chars().all(|c| c == '/'));
    if root_only {
        return Ok(format!("{}://{}", &captures["scheme"], &captures["host"]));
    }

    Ok(lowered)
}

/// Returns the host of `url` when it parses as an absolute URL.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
}

/// Whether the URL's host sits under the onion top-level label.
///
/// Scheme and host are inspected case-insensitively.
#[must_use]
pub fn is_onion_url(url: &str) -> bool {
    host_of(url)
        .as_deref()
        .and_then(|host| host.trim_end_matches('.').rsplit('.').next())
        .is_some_and(|tld| tld == ONION_TLD)
}
