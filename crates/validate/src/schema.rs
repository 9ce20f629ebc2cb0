//! Deciding which schemas apply to a document.

use crate::{Error, Mode, Result};
use stac_validator_core::{Document, SelfHref, Type, Version, href};
use std::path::Path;

/// Where STAC publishes the schemas for 1.0.0 and later (including the 1.0.0
/// pre-releases).
pub const SCHEMA_BASE: &str = "https://schemas.stacspec.org";

/// Where the schemas for pre-1.0 STAC versions are mirrored.
pub const LEGACY_SCHEMA_BASE: &str = "https://cdn.staclint.com";

/// Where a schema came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// The core schema for a document type.
    Core,

    /// A STAC extension schema.
    Extension,

    /// A user-supplied schema.
    Custom,
}

/// A schema to validate against, by href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSource {
    /// The schema's href, a url or a local path.
    pub href: String,

    /// What kind of schema this is.
    pub kind: SchemaKind,
}

/// Returns the schemas that a document should be validated against, in
/// order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_validator::{Mode, schema};
/// use stac_validator_core::Document;
///
/// let document = Document::from_value(json!({
///     "type": "Catalog",
///     "stac_version": "1.0.0",
///     "stac_extensions": ["https://stac-extensions.github.io/version/v1.0.0/schema.json"],
///     "id": "a-catalog",
///     "description": "A catalog",
///     "links": []
/// })).unwrap();
/// let sources = schema::sources(&document, &Mode::Default).unwrap();
/// assert_eq!(
///     sources[0].href,
///     "https://schemas.stacspec.org/v1.0.0/catalog-spec/json-schema/catalog.json"
/// );
/// assert_eq!(sources[1].href, "https://stac-extensions.github.io/version/v1.0.0/schema.json");
/// ```
pub fn sources(document: &Document, mode: &Mode) -> Result<Vec<SchemaSource>> {
    match mode {
        Mode::Core => Ok(vec![core(document)?]),
        Mode::Extensions => extensions(document),
        Mode::Default => {
            let mut sources = vec![core(document)?];
            sources.extend(extensions(document)?);
            Ok(sources)
        }
        Mode::Custom(custom) => Ok(vec![SchemaSource {
            href: custom_href(custom),
            kind: SchemaKind::Custom,
        }]),
    }
}

/// Returns the href of the core schema for a type and version.
///
/// # Examples
///
/// ```
/// use stac_validator::schema::core_href;
/// use stac_validator_core::Type;
///
/// assert_eq!(
///     core_href(Type::Item, &"1.1.0".parse().unwrap()),
///     "https://schemas.stacspec.org/v1.1.0/item-spec/json-schema/item.json"
/// );
/// assert_eq!(
///     core_href(Type::Collection, &"0.9.0".parse().unwrap()),
///     "https://cdn.staclint.com/v0.9.0/collection.json"
/// );
/// ```
pub fn core_href(r#type: Type, version: &Version) -> String {
    if version.is_legacy() {
        format!(
            "{}/v{}/{}.json",
            LEGACY_SCHEMA_BASE,
            version,
            r#type.schema_name()
        )
    } else {
        format!("{}{}", SCHEMA_BASE, r#type.spec_path(version))
    }
}

/// Returns the href of an extension's schema.
///
/// Urls are used as they are. Bare names (the pre-1.0 style, e.g. `eo`) map
/// to the legacy schema mirror for the document's version. Anything else is
/// a path, resolved against `base` (usually the document's own href) unless
/// it already exists as given.
pub fn extension_href(
    extension: &str,
    version: Option<&Version>,
    base: Option<&str>,
) -> Result<String> {
    if href::is_url(extension) || Path::new(extension).exists() {
        Ok(extension.to_string())
    } else if is_bare_name(extension) {
        let version = version.ok_or_else(|| Error::SchemaResolution {
            schema: format!("extension {extension}"),
            message: "the document has no valid stac_version".to_string(),
        })?;
        Ok(format!(
            "{}/v{}/extension/{}.json",
            LEGACY_SCHEMA_BASE, version, extension
        ))
    } else if let Some(base) = base {
        href::make_absolute(extension, base)
            .map(|href| href.into_owned())
            .map_err(|err| Error::SchemaResolution {
                schema: extension.to_string(),
                message: err.to_string(),
            })
    } else {
        Ok(extension.to_string())
    }
}

/// Returns the href of a custom schema: a canonical local path if one exists
/// on disk, otherwise the source as given (expected to be a url).
pub fn custom_href(custom: &str) -> String {
    Path::new(custom)
        .canonicalize()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| custom.to_string())
}

fn core(document: &Document) -> Result<SchemaSource> {
    let version = document.version().ok_or_else(|| Error::SchemaResolution {
        schema: format!("{} core schema", document.r#type()),
        message: "the document has no valid stac_version".to_string(),
    })?;
    Ok(SchemaSource {
        href: core_href(document.r#type(), version),
        kind: SchemaKind::Core,
    })
}

fn extensions(document: &Document) -> Result<Vec<SchemaSource>> {
    document
        .extensions()
        .iter()
        .map(|extension| {
            extension_href(extension, document.version(), document.self_href()).map(|href| {
                SchemaSource {
                    href,
                    kind: SchemaKind::Extension,
                }
            })
        })
        .collect()
}

fn is_bare_name(extension: &str) -> bool {
    !extension.is_empty()
        && extension
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::{SchemaKind, sources};
    use crate::{Error, Mode};
    use serde_json::json;
    use stac_validator_core::{Document, SelfHref};

    fn item(extensions: serde_json::Value) -> Document {
        Document::from_value(json!({
            "type": "Feature",
            "stac_version": "1.0.0",
            "stac_extensions": extensions,
            "id": "an-item",
            "geometry": null,
            "properties": {"datetime": "2024-01-01T00:00:00Z"},
            "links": [],
            "assets": {}
        }))
        .unwrap()
    }

    #[test]
    fn core() {
        let sources = sources(&item(json!([])), &Mode::Core).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].kind, SchemaKind::Core);
        assert_eq!(
            sources[0].href,
            "https://schemas.stacspec.org/v1.0.0/item-spec/json-schema/item.json"
        );
    }

    #[test]
    fn extensions_empty_is_not_an_error() {
        assert!(sources(&item(json!([])), &Mode::Extensions).unwrap().is_empty());
    }

    #[test]
    fn default_is_core_then_extensions() {
        let document = item(json!([
            "https://stac-extensions.github.io/eo/v1.0.0/schema.json",
            "https://stac-extensions.github.io/projection/v1.0.0/schema.json"
        ]));
        let hrefs: Vec<_> = sources(&document, &Mode::Default)
            .unwrap()
            .into_iter()
            .map(|source| source.href)
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "https://schemas.stacspec.org/v1.0.0/item-spec/json-schema/item.json",
                "https://stac-extensions.github.io/eo/v1.0.0/schema.json",
                "https://stac-extensions.github.io/projection/v1.0.0/schema.json",
            ]
        );
    }

    #[test]
    fn legacy_extension_name() {
        let document = Document::from_value(json!({
            "stac_version": "0.9.0",
            "stac_extensions": ["eo"],
            "id": "an-item",
            "properties": {}
        }))
        .unwrap();
        let sources = sources(&document, &Mode::Extensions).unwrap();
        assert_eq!(sources[0].href, "https://cdn.staclint.com/v0.9.0/extension/eo.json");
    }

    #[test]
    fn relative_extension_path() {
        let mut document = item(json!(["./extensions/my-extension.json"]));
        document.set_self_href("/data/items/item.json");
        let sources = sources(&document, &Mode::Extensions).unwrap();
        assert_eq!(sources[0].href, "/data/items/extensions/my-extension.json");
    }

    #[test]
    fn custom_ignores_the_document() {
        let sources = sources(
            &item(json!(["https://stac-extensions.github.io/eo/v1.0.0/schema.json"])),
            &Mode::Custom("https://stac.test/schema.json".to_string()),
        )
        .unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].kind, SchemaKind::Custom);
        assert_eq!(sources[0].href, "https://stac.test/schema.json");
    }

    #[test]
    fn custom_local_path() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("schema.json");
        std::fs::write(&path, "{}").unwrap();
        let href = super::custom_href(path.to_str().unwrap());
        assert_eq!(href, path.canonicalize().unwrap().to_str().unwrap());
    }

    #[test]
    fn missing_version() {
        let document = Document::from_value(json!({
            "type": "Catalog",
            "id": "no-version",
            "description": "A catalog",
            "links": []
        }))
        .unwrap();
        assert!(matches!(
            sources(&document, &Mode::Core).unwrap_err(),
            Error::SchemaResolution { .. }
        ));
        let _ = sources(&document, &Mode::Custom("schema.json".to_string())).unwrap();
    }
}
