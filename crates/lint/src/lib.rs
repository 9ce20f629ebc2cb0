//! Best-practice checks for STAC documents.
//!
//! Linting goes beyond json-schema: a document can be perfectly valid and
//! still be hard to search, index, or display. A [LintReport] records the
//! result of core and extension validation along with any best-practice
//! warnings.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use stac_validator_io::MemoryFetcher;
//! use stac_validator_lint::Linter;
//! use std::sync::Arc;
//!
//! let fetcher = MemoryFetcher::new().with_json(
//!     "https://stac.test/catalog.json",
//!     json!({
//!         "type": "Catalog",
//!         "stac_version": "1.0.0",
//!         "id": "A Catalog",
//!         "description": "",
//!         "links": []
//!     }),
//! );
//! let mut linter = Linter::new(Arc::new(fetcher));
//! let report = linter.lint("https://stac.test/catalog.json").unwrap();
//! assert!(report.warnings.iter().any(|w| w.check == "searchable_identifiers"));
//! ```

pub mod check;
mod error;
mod linter;

pub use {
    error::Error,
    linter::{LintReport, Linter, Warning},
};

/// Custom [Result](std::result::Result) type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
