//! A small HTTP service that validates STAC documents by href.
//!
//! | Method        | Path            | Response                                  |
//! | ------------- | --------------- | ----------------------------------------- |
//! | `GET`         | `/`             | A plain-text greeting                     |
//! | `GET`, `POST` | `/api/validate` | The JSON report for `?stac_catalog=<url>` |
//!
//! # Examples
//!
//! ```
//! use stac_validator_server::Api;
//!
//! let router = stac_validator_server::routes::from_api(Api::new());
//! ```
//!
//! Only http(s) urls are validated. Local paths are refused, both as the
//! root and as extension schemas named by a document.
//!
//! Serve the router with [axum::serve].

mod api;
mod error;
pub mod routes;

pub use {api::Api, error::Error};

/// Custom [Result](std::result::Result) type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The default address to serve on.
pub const DEFAULT_ADDR: &str = "127.0.0.1:7823";
