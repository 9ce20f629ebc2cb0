use crate::{Error, Fetch, Result};
use serde_json::Value;
use stac_validator_core::{Document, FromJson, SelfHref, href};
use std::path::Path;
use url::Url;

/// Reads a STAC document from an href.
///
/// The document's self href is set to the href it was read from.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_validator_core::SelfHref;
/// use stac_validator_io::MemoryFetcher;
///
/// let fetcher = MemoryFetcher::new().with_json(
///     "https://stac.test/catalog.json",
///     json!({
///         "type": "Catalog",
///         "stac_version": "1.0.0",
///         "id": "a",
///         "description": "b",
///         "links": []
///     }),
/// );
/// let document = stac_validator_io::read(&fetcher, "https://stac.test/catalog.json").unwrap();
/// assert_eq!(document.self_href(), Some("https://stac.test/catalog.json"));
/// ```
pub fn read<F: Fetch + ?Sized>(fetcher: &F, href: &str) -> Result<Document> {
    let bytes = fetcher.fetch(href)?;
    let mut document = Document::from_json_slice(&bytes)?;
    document.set_self_href(href);
    Ok(document)
}

/// Reads arbitrary JSON from an href.
pub fn read_json<F: Fetch + ?Sized>(fetcher: &F, href: &str) -> Result<Value> {
    let bytes = fetcher.fetch(href)?;
    serde_json::from_slice(&bytes).map_err(Error::from)
}

/// Normalizes an href so that two spellings of the same location compare
/// equal.
///
/// Urls are round-tripped through [Url]. Local paths are made absolute
/// against the current directory, canonicalized if they exist, and have
/// their `.` and `..` segments collapsed otherwise.
///
/// # Examples
///
/// ```
/// use stac_validator_io::normalize_href;
///
/// assert_eq!(
///     normalize_href("https://stac.test/a/../catalog.json"),
///     "https://stac.test/catalog.json"
/// );
/// assert_eq!(normalize_href("/data/./a/../catalog.json"), "/data/catalog.json");
/// ```
pub fn normalize_href(href: &str) -> String {
    if href::is_url(href) {
        return Url::parse(href)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| href.to_string());
    }
    let path = Path::new(href);
    if let Ok(path) = path.canonicalize() {
        return path.to_string_lossy().into_owned();
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    href::normalize_path(&absolute.to_string_lossy())
}
