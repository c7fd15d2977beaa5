//! Instance Catalog Core Library
//!
//! Turns a CSV list of service instances into a JSON catalog, probing each
//! instance live (directly, or through Tor for onion services) and scraping
//! its version from the landing page.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - CSV row tokenizer and URL canonicalization
//! - [`probe`] - HTTP(S)/Tor probing with fixed retries
//! - [`catalog`] - Entry Builder, catalog document, snapshot import
//! - [`assembler`] - One run from instance list to document

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assembler;
pub mod catalog;
pub mod parser;
pub mod probe;
pub mod user_agent;

// Re-export commonly used types
pub use assembler::{
    Assembler, InputSource, OutputError, OutputSink, RowOutcome, RunError, RunOptions, RunReport,
    run_catalog, run_with_probe, write_document,
};
pub use catalog::{BuildError, CatalogDocument, CatalogEntry, CatalogInstance, build_entry};
pub use parser::{CsvError, CsvRow, UrlError, canonicalize_url, parse_row};
pub use probe::{DEFAULT_TOR_PROXY, HttpProber, Probe, ProbeConfig, ProbeError, RetryPolicy, TorProxy};
