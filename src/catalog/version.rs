//! Version scraping from instance landing pages.

use std::sync::LazyLock;

use regex::Regex;

/// `v` followed by three dot-separated numeric groups.
#[allow(clippy::expect_used)]
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v[0-9]+\.[0-9]+\.[0-9]+").expect("version regex is valid") // Static pattern, safe to panic
});

/// Returns the first `vX.Y.Z` token in `body`.
///
/// Instances reporting non-semantic versions never match.
#[must_use]
pub fn extract_version(body: &str) -> Option<&str> {
    VERSION_PATTERN.find(body).map(|m| m.as_str())
}
