//! Validate STAC catalogs, collections, and items with
//! [json-schema](https://json-schema.org/), optionally following their links.
//!
//! # Examples
//!
//! Most callers build a [Config] and [run] it:
//!
//! ```no_run
//! use stac_validator::{Config, Mode};
//!
//! let config = Config::new("catalog.json")
//!     .with_mode(Mode::Default)
//!     .with_recursive(true);
//! let report = stac_validator::run(&config).unwrap();
//! println!("root valid: {}", report.overall_valid());
//! ```
//!
//! Everything is read through a [Fetch](stac_validator_io::Fetch)
//! implementation, so documents and schemas can come from memory:
//!
//! ```
//! use serde_json::json;
//! use stac_validator::{Config, Mode};
//! use stac_validator_io::MemoryFetcher;
//! use std::sync::Arc;
//!
//! let fetcher = MemoryFetcher::new()
//!     .with_json("https://stac.test/schema.json", json!({"required": ["foo"]}))
//!     .with_json(
//!         "https://stac.test/catalog.json",
//!         json!({
//!             "type": "Catalog",
//!             "stac_version": "1.0.0",
//!             "id": "a",
//!             "description": "b",
//!             "links": []
//!         }),
//!     );
//! let config = Config::new("https://stac.test/catalog.json")
//!     .with_mode(Mode::Custom("https://stac.test/schema.json".to_string()));
//! let report = stac_validator::run_with(&config, Arc::new(fetcher), |_| {}).unwrap();
//! assert!(!report.overall_valid());
//! assert!(report.results()[0].violations()[0].message.contains("foo"));
//! ```
//!
//! A [Validator] caches every schema it compiles, so re-use one when
//! validating many documents.

mod config;
mod error;
mod mode;
mod result;
pub mod schema;
mod validator;
mod walk;

pub use {
    config::Config,
    error::{Error, Violation, ViolationKind},
    mode::Mode,
    result::{HrefChecks, Report, ValidationResult},
    validator::{Checks, Validator},
    walk::Walker,
};

use stac_validator_core::href;
use stac_validator_io::{Fetch, Fetcher};
use std::{path::Path, sync::Arc};

/// Public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Runs one validation, reading with a [Fetcher] that uses the configured
/// timeout.
///
/// The only errors are invocation errors: the root is a local file that
/// doesn't exist, or the http client can't be built. Everything that goes
/// wrong with a document ends up in the [Report].
pub fn run(config: &Config) -> Result<Report> {
    run_observed(config, |_| {})
}

/// Like [run], but calls `observer` with each result as soon as it is
/// produced if the configuration is verbose.
pub fn run_observed(config: &Config, observer: impl FnMut(&ValidationResult)) -> Result<Report> {
    if !href::is_url(&config.href) && !Path::new(&config.href).exists() {
        return Err(Error::RootNotFound(config.href.clone()));
    }
    let fetcher = Fetcher::with_timeout(config.timeout)?;
    run_with(config, Arc::new(fetcher), observer)
}

/// Runs one validation with the given fetcher.
///
/// If the configuration is verbose, `observer` is called with each result as
/// soon as it is produced.
pub fn run_with(
    config: &Config,
    fetcher: Arc<dyn Fetch>,
    mut observer: impl FnMut(&ValidationResult),
) -> Result<Report> {
    let mut validator = Validator::new(fetcher);
    let mut observer = |result: &ValidationResult| {
        if config.verbose {
            observer(result)
        }
    };
    let results = if config.recursive {
        Walker::new(config.mode.clone())
            .with_checks(config.checks)
            .with_max_depth(config.max_depth)
            .walk_with(&mut validator, &config.href, observer)
    } else {
        let href = stac_validator_io::normalize_href(&config.href);
        let result = validator.validate_href(&href, &config.mode, config.checks);
        tracing::info!("validated href={} valid={}", result.path(), result.is_valid());
        observer(&result);
        vec![result]
    };
    Ok(Report::from(results))
}
