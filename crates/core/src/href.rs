//! Utilities and structures for working with hrefs.

use crate::Result;
use std::borrow::Cow;
use url::Url;

/// Implemented by STAC documents, the [SelfHref] trait allows getting and
/// setting the href a document was read from.
///
/// The self href isn't part of the data structure, but the validator needs it
/// to resolve relative links and assets, and to report where each result
/// came from.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_validator_core::{Document, SelfHref};
///
/// let mut document = Document::from_value(json!({
///     "type": "Catalog",
///     "stac_version": "1.0.0",
///     "id": "an-id",
///     "description": "a description",
///     "links": []
/// })).unwrap();
/// assert!(document.self_href().is_none());
/// document.set_self_href("/data/catalog.json");
/// assert_eq!(document.self_href().unwrap(), "/data/catalog.json");
/// ```
pub trait SelfHref {
    /// Gets this object's href.
    fn self_href(&self) -> Option<&str>;

    /// Returns a mutable reference to this object's self href.
    fn self_href_mut(&mut self) -> &mut Option<String>;

    /// Sets this object's self href.
    fn set_self_href(&mut self, href: impl ToString) {
        *self.self_href_mut() = Some(href.to_string())
    }

    /// Clear's this object's self href.
    fn clear_self_href(&mut self) {
        *self.self_href_mut() = None
    }
}

/// Returns `true` if the href is absolute.
///
/// An href is absolute if it can be parsed to a url or starts with a `/`.
pub fn is_absolute(href: &str) -> bool {
    is_url(href) || href.starts_with('/')
}

/// Returns `true` if the href parses as a url with a scheme we know how to
/// fetch (`http`, `https`, or `file`).
///
/// # Examples
///
/// ```
/// use stac_validator_core::href;
///
/// assert!(href::is_url("https://stac.test/catalog.json"));
/// assert!(!href::is_url("data/catalog.json"));
/// ```
pub fn is_url(href: &str) -> bool {
    Url::parse(href)
        .map(|url| matches!(url.scheme(), "http" | "https" | "file"))
        .unwrap_or(false)
}

/// Makes an href absolute relative to a base.
///
/// # Examples
///
/// ```
/// use stac_validator_core::href::make_absolute;
///
/// assert_eq!(make_absolute("./item.json", "/a/b").unwrap(), "/a/item.json");
/// assert_eq!(make_absolute("./item.json", "/a/b/").unwrap(), "/a/b/item.json");
/// assert_eq!(make_absolute("../item.json", "/a/b/catalog.json").unwrap(), "/a/item.json");
/// assert_eq!(
///     make_absolute("http://stac.test/item.json", "/a/b/").unwrap(),
///     "http://stac.test/item.json"
/// );
/// assert_eq!(
///     make_absolute("item.json", "http://stac.test/a/catalog.json").unwrap(),
///     "http://stac.test/a/item.json"
/// );
/// ```
pub fn make_absolute<'a>(href: &'a str, base: &str) -> Result<Cow<'a, str>> {
    if is_absolute(href) {
        Ok(href.into())
    } else if let Ok(url) = Url::parse(base) {
        let url = url.join(href)?;
        Ok(url.to_string().into())
    } else {
        let (base, _) = base.split_at(base.rfind('/').unwrap_or(0));
        if base.is_empty() && !href.starts_with('/') {
            Ok(normalize_path(href).into())
        } else {
            Ok(normalize_path(&format!("{}/{}", base, href)).into())
        }
    }
}

/// Collapses `.` and `..` segments and repeated separators in a path.
///
/// Leading `..` segments of a relative path are kept, since there's nothing
/// to collapse them into.
///
/// # Examples
///
/// ```
/// use stac_validator_core::href::normalize_path;
///
/// assert_eq!(normalize_path("/a/./b/../c.json"), "/a/c.json");
/// assert_eq!(normalize_path("../a//b.json"), "../a/b.json");
/// ```
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    let _ = parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    #[rstest]
    #[case("catalog.json", "item.json", "item.json")]
    #[case("a/catalog.json", "./b/item.json", "a/b/item.json")]
    #[case("a/catalog.json", "../item.json", "item.json")]
    #[case("/a/catalog.json", "/b/item.json", "/b/item.json")]
    #[case("file:///a/catalog.json", "b/item.json", "file:///a/b/item.json")]
    #[case("https://stac.test/a/", "item.json", "https://stac.test/a/item.json")]
    fn make_absolute(#[case] base: &str, #[case] href: &str, #[case] expected: &str) {
        assert_eq!(super::make_absolute(href, base).unwrap(), expected);
    }

    #[test]
    fn relative_paths_stay_relative() {
        assert!(!super::is_absolute("item.json"));
        assert_eq!(super::normalize_path("./item.json"), "item.json");
    }
}
