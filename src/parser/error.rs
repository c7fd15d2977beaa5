//! Error types for CSV row parsing and URL canonicalization.

use thiserror::Error;

/// Errors that can occur while tokenizing a CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    /// Input ended inside a quoted span.
    #[error("unterminated quote in row: {row_preview}")]
    UnterminatedQuote {
        /// Truncated row for display
        row_preview: String,
    },

    /// Input ended right after an escape marker.
    #[error("unterminated escape sequence at end of row: {row_preview}")]
    UnterminatedEscape {
        /// Truncated row for display
        row_preview: String,
    },

    /// Row tokenized fine but does not carry 3 or 4 fields.
    #[error("expected 3 or 4 fields, found {found}: {row_preview}\n  Suggestion: rows are url,country,cloudflare[,description]")]
    FieldCount {
        /// Number of fields produced by the tokenizer
        found: usize,
        /// Truncated row for display
        row_preview: String,
    },
}

impl CsvError {
    /// Creates an `UnterminatedQuote` error for the given row.
    #[must_use]
    pub fn unterminated_quote(row: &str) -> Self {
        Self::UnterminatedQuote {
            row_preview: preview(row),
        }
    }

    /// Creates an `UnterminatedEscape` error for the given row.
    #[must_use]
    pub fn unterminated_escape(row: &str) -> Self {
        Self::UnterminatedEscape {
            row_preview: preview(row),
        }
    }

    /// Creates a `FieldCount` error for the given row.
    #[must_use]
    pub fn field_count(row: &str, found: usize) -> Self {
        Self::FieldCount {
            found,
            row_preview: preview(row),
        }
    }

    /// Whether the row text ended mid-token, so more input may complete it.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedQuote { .. } | Self::UnterminatedEscape { .. }
        )
    }
}

/// Errors produced by URL canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// Nothing to canonicalize.
    #[error("empty URL")]
    EmptyInput,

    /// The string is not shaped like `scheme://host[/path]`.
    #[error("invalid URL '{url}': expected scheme://host[/path]\n  Suggestion: IDN hosts must be punycode-encoded")]
    InvalidShape {
        /// The URL that failed validation
        url: String,
    },
}

fn preview(row: &str) -> String {
    row.chars().take(80).collect()
}
