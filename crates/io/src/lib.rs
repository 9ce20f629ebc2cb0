//! Input for [stac-validator](https://github.com/stac-utils/stac-validator).
//!
//! Everything the validator reads, it reads through the [Fetch] trait, so
//! tests (and other embedders) can swap in a [MemoryFetcher].

mod error;
mod fetch;
mod read;
mod realized_href;

pub use {
    error::Error,
    fetch::{DEFAULT_TIMEOUT, Fetch, Fetcher, MemoryFetcher},
    read::{normalize_href, read, read_json},
    realized_href::RealizedHref,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns a string suitable for use as a HTTP user agent.
pub fn user_agent() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}
