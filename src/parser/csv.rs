//! Row tokenizer for the instance list.
//!
//! The dialect is deliberately small: a double quote opens or closes a
//! literal span and is dropped from the value, a backslash copies the next
//! character verbatim, and the delimiter splits fields outside quoted spans.
//! Newlines are ordinary characters here; callers hand in one row at a time.

use tracing::trace;

use super::error::CsvError;

/// Field delimiter used by the instance list.
pub const DEFAULT_DELIMITER: char = ',';

const QUOTE: char = '"';
const ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InQuote,
    PostEscape { in_quote: bool },
}

/// Tokenizes one row into its field values.
///
/// A trailing delimiter yields a final empty field. A row with no delimiter
/// and no content (including `""`) yields no fields at all.
///
/// # Errors
///
/// Returns [`CsvError::UnterminatedQuote`] or [`CsvError::UnterminatedEscape`]
/// when the row ends inside a quoted span or right after an escape marker.
///
/// # Examples
///
/// ```
/// use catalog_core::parser::{DEFAULT_DELIMITER, parse_row};
///
/// let fields = parse_row(r#"a,"b,c",d"#, DEFAULT_DELIMITER).unwrap();
/// assert_eq!(fields, vec!["a", "b,c", "d"]);
/// ```
pub fn parse_row(row: &str, delimiter: char) -> Result<Vec<String>, CsvError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = State::Normal;

    for c in row.chars() {
        state = match state {
            State::PostEscape { in_quote } => {
                current.push(c);
                if in_quote {
                    State::InQuote
                } else {
                    State::Normal
                }
            }
            State::Normal if c == ESCAPE => State::PostEscape { in_quote: false },
            State::InQuote if c == ESCAPE => State::PostEscape { in_quote: true },
            State::Normal if c == QUOTE => State::InQuote,
            State::InQuote if c == QUOTE => State::Normal,
            State::Normal if c == delimiter => {
                fields.push(std::mem::take(&mut current));
                State::Normal
            }
            other => {
                current.push(c);
                other
            }
        };
    }

    match state {
        State::InQuote => return Err(CsvError::unterminated_quote(row)),
        State::PostEscape { .. } => return Err(CsvError::unterminated_escape(row)),
        State::Normal => {}
    }

    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
    }

    trace!(fields = fields.len(), "tokenized row");
    Ok(fields)
}

/// One instance row: `url,country,cloudflare[,description]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// Instance URL as written in the list.
    pub url: String,
    /// Two-letter country code.
    pub country: String,
    /// Raw cloudflare column; only the exact text `true` means true.
    pub cloudflare: String,
    /// Free-form description, empty when absent.
    pub description: String,
}

impl CsvRow {
    /// Builds a row from tokenized fields.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::FieldCount`] unless there are exactly 3 or 4 fields.
    pub fn from_fields(row: &str, fields: Vec<String>) -> Result<Self, CsvError> {
        let found = fields.len();
        if !(3..=4).contains(&found) {
            return Err(CsvError::field_count(row, found));
        }
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(Self {
            url: next(),
            country: next(),
            cloudflare: next(),
            description: next(),
        })
    }

    /// Tokenizes and shapes a row in one step.
    ///
    /// # Errors
    ///
    /// Returns any tokenizer error, or [`CsvError::FieldCount`].
    pub fn parse(row: &str, delimiter: char) -> Result<Self, CsvError> {
        Self::from_fields(row, parse_row(row, delimiter)?)
    }
}
