//! Input parsing for the instance list.
//!
//! Two leaf concerns live here:
//! - [`parse_row`] / [`CsvRow`] tokenize one line of the list with a small
//!   quote/escape dialect (not RFC 4180)
//! - [`canonicalize_url`] normalizes an instance URL and checks its shape
//!
//! # Example
//!
//! ```
//! use catalog_core::parser::{CsvRow, DEFAULT_DELIMITER, canonicalize_url};
//!
//! let row = CsvRow::parse("HTTPS://Example.com/,US,true,Example", DEFAULT_DELIMITER).unwrap();
//! assert_eq!(canonicalize_url(&row.url).unwrap(), "https://example.com");
//! ```

mod csv;
mod error;
mod url;

pub use csv::{CsvRow, DEFAULT_DELIMITER, parse_row};
pub use error::{CsvError, UrlError};
pub use url::{ONION_TLD, canonicalize_url, host_of, is_onion_url};
