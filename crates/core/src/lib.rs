//! The STAC document model used by [stac-validator](https://github.com/stac-utils/stac-validator).
//!
//! This crate **is**:
//!
//! - A read-only, typed view over STAC Catalogs, Collections, and Items
//! - Helpers for resolving relative hrefs
//!
//! This crate **is not**:
//!
//! - A full STAC data model: documents are validated, not built or edited
//! - A reader: fetching lives in `stac-validator-io`
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use stac_validator_core::{Document, Type};
//!
//! let document = Document::from_value(json!({
//!     "type": "Catalog",
//!     "stac_version": "1.0.0",
//!     "id": "examples",
//!     "description": "An example catalog",
//!     "links": [{"rel": "child", "href": "./collection.json"}]
//! })).unwrap();
//! assert_eq!(document.r#type(), Type::Catalog);
//! assert_eq!(document.child_links().count(), 1);
//! ```

#![warn(missing_docs, unused_qualifications)]

mod asset;
mod document;
mod error;
pub mod href;
mod json;
pub mod link;
mod r#type;
mod version;

pub use {
    asset::Asset,
    document::Document,
    error::Error,
    href::SelfHref,
    json::FromJson,
    link::Link,
    r#type::Type,
    version::{LATEST_VERSION, Version},
};

/// Custom [Result](std::result::Result) type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
