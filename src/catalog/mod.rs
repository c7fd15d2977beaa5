//! Catalog entries, the Entry Builder, and the output document.
//!
//! # Overview
//!
//! [`build_entry`] probes one row's instance and scrapes its version into a
//! [`CatalogEntry`]. [`CatalogDocument::assemble`] wraps probed entries and
//! entries imported with [`load_onion_entries`] into the final document.

mod builder;
mod document;
mod entry;
mod version;

pub use builder::{BuildError, build_entry};
pub use document::{
    CatalogDocument, CatalogInstance, ImportError, ImportedEntry, extract_onion_entries,
    load_onion_entries,
};
pub use entry::{Address, CatalogEntry};
pub use version::extract_version;
