//! User-Agent strings for probe requests.

/// Default User-Agent, `instance-catalog/<version>`.
#[must_use]
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Picks the configured client identifier, falling back to the default.
///
/// Blank identifiers count as unset.
#[must_use]
pub fn resolve_user_agent(custom: Option<&str>) -> String {
    custom
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(default_user_agent, str::to_string)
}
