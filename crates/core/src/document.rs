use crate::{Asset, Error, Link, Result, SelfHref, Type, Version};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A parsed STAC Catalog, Collection, or Item.
///
/// The document keeps the raw JSON object it was parsed from, since that's
/// what gets validated against the schemas. The typed fields are a read-only
/// view over it, decided once at parse time.
///
/// Parsing is lenient about everything except the document's type: malformed
/// links, assets, or extensions are left for the schemas to report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Document {
    r#type: Type,
    id: Option<String>,
    version: Option<Version>,
    links: Vec<Link>,
    assets: IndexMap<String, Asset>,
    extensions: Vec<String>,
    self_href: Option<String>,
    object: Map<String, Value>,
}

impl Document {
    /// Creates a document from a JSON value.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_validator_core::{Document, Type};
    ///
    /// let document = Document::from_value(json!({
    ///     "stac_version": "0.9.0",
    ///     "id": "old-collection",
    ///     "description": "A collection without a type field",
    ///     "license": "MIT",
    ///     "extent": {},
    ///     "links": [],
    /// })).unwrap();
    /// assert_eq!(document.r#type(), Type::Collection);
    /// ```
    pub fn from_value(value: Value) -> Result<Document> {
        if let Value::Object(object) = value {
            Document::from_object(object)
        } else {
            Err(Error::NotAnObject(value))
        }
    }

    /// Creates a document from a JSON object.
    pub fn from_object(object: Map<String, Value>) -> Result<Document> {
        let r#type = infer_type(&object)?;
        let id = object
            .get("id")
            .and_then(|v| v.as_str())
            .map(String::from);
        let version = object
            .get("stac_version")
            .and_then(|v| v.as_str())
            .and_then(|v| v.parse().ok());
        let links = object
            .get("links")
            .and_then(|v| v.as_array())
            .map(|links| {
                links
                    .iter()
                    .filter_map(|link| serde_json::from_value(link.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        let assets = object
            .get("assets")
            .and_then(|v| v.as_object())
            .map(|assets| {
                assets
                    .iter()
                    .filter_map(|(key, asset)| {
                        serde_json::from_value(asset.clone())
                            .ok()
                            .map(|asset| (key.clone(), asset))
                    })
                    .collect()
            })
            .unwrap_or_default();
        let mut extensions: Vec<String> = Vec::new();
        if let Some(values) = object.get("stac_extensions").and_then(|v| v.as_array()) {
            for extension in values.iter().filter_map(|v| v.as_str()) {
                if !extensions.iter().any(|e| e == extension) {
                    extensions.push(extension.to_string());
                }
            }
        }
        Ok(Document {
            r#type,
            id,
            version,
            links,
            assets,
            extensions,
            self_href: None,
            object,
        })
    }

    /// Returns this document's type.
    pub fn r#type(&self) -> Type {
        self.r#type
    }

    /// Returns this document's id, if it has a string one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns this document's `stac_version`, if it has a valid one.
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Returns this document's links, in document order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns this document's assets, in document order.
    pub fn assets(&self) -> &IndexMap<String, Asset> {
        &self.assets
    }

    /// Returns the extensions declared in `stac_extensions`, in declaration
    /// order and without duplicates.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns the links to child documents (`child` and `item` rels).
    ///
    /// Items never have children, so this is empty for them regardless of
    /// their links.
    pub fn child_links(&self) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(move |link| self.r#type.has_children() && (link.is_child() || link.is_item()))
    }

    /// Returns a field from the raw JSON object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.object.get(key)
    }

    /// Returns the raw JSON object.
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.object
    }

    /// Returns the raw JSON as a [Value].
    pub fn to_value(&self) -> Value {
        Value::Object(self.object.clone())
    }
}

impl SelfHref for Document {
    fn self_href(&self) -> Option<&str> {
        self.self_href.as_deref()
    }

    fn self_href_mut(&mut self) -> &mut Option<String> {
        &mut self.self_href
    }
}

impl TryFrom<Map<String, Value>> for Document {
    type Error = Error;

    fn try_from(object: Map<String, Value>) -> Result<Document> {
        Document::from_object(object)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.object.serialize(serializer)
    }
}

fn infer_type(object: &Map<String, Value>) -> Result<Type> {
    match object.get("type") {
        Some(Value::String(s)) => s.parse(),
        Some(_) => Err(Error::InvalidField {
            field: "type",
            expected: "a string",
        }),
        None => {
            if object.contains_key("geometry") || object.contains_key("properties") {
                Ok(Type::Item)
            } else if object.contains_key("extent") {
                Ok(Type::Collection)
            } else if object.contains_key("description") && object.contains_key("links") {
                Ok(Type::Catalog)
            } else {
                Err(Error::MissingField("type"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::{Error, Type};
    use serde_json::json;

    fn catalog() -> serde_json::Value {
        json!({
            "type": "Catalog",
            "stac_version": "1.0.0",
            "stac_extensions": [
                "https://stac-extensions.github.io/eo/v1.0.0/schema.json",
                "https://stac-extensions.github.io/eo/v1.0.0/schema.json"
            ],
            "id": "root",
            "description": "The root",
            "links": [
                {"rel": "self", "href": "./catalog.json"},
                {"rel": "child", "href": "./a/catalog.json"},
                {"rel": "license"},
                {"rel": "item", "href": "./item.json", "title": "An item"}
            ]
        })
    }

    #[test]
    fn parse_catalog() {
        let document = Document::from_value(catalog()).unwrap();
        assert_eq!(document.r#type(), Type::Catalog);
        assert_eq!(document.id(), Some("root"));
        assert_eq!(document.version().unwrap().as_str(), "1.0.0");
        assert_eq!(document.links().len(), 3, "the link without an href is dropped");
        assert_eq!(document.extensions().len(), 1);
        let children: Vec<_> = document.child_links().map(|l| l.href.as_str()).collect();
        assert_eq!(children, vec!["./a/catalog.json", "./item.json"]);
    }

    #[test]
    fn items_have_no_children() {
        let document = Document::from_value(json!({
            "type": "Feature",
            "stac_version": "1.0.0",
            "id": "an-item",
            "geometry": null,
            "properties": {"datetime": null},
            "links": [{"rel": "child", "href": "./nope.json"}],
            "assets": {"data": {"href": "./data.tif", "roles": ["data"]}}
        }))
        .unwrap();
        assert_eq!(document.r#type(), Type::Item);
        assert_eq!(document.child_links().count(), 0);
        assert!(document.assets()["data"].has_role("data"));
    }

    #[test]
    fn infer_legacy_item() {
        let document = Document::from_value(json!({
            "stac_version": "0.8.0",
            "id": "an-item",
            "properties": {}
        }))
        .unwrap();
        assert_eq!(document.r#type(), Type::Item);
    }

    #[test]
    fn not_stac() {
        assert!(matches!(
            Document::from_value(json!({"foo": "bar"})).unwrap_err(),
            Error::MissingField("type")
        ));
        assert!(matches!(
            Document::from_value(json!({"type": "FeatureCollection", "features": []}))
                .unwrap_err(),
            Error::UnknownType(_)
        ));
        assert!(matches!(
            Document::from_value(json!({"type": 42})).unwrap_err(),
            Error::InvalidField { field: "type", .. }
        ));
        assert!(matches!(
            Document::from_value(json!([])).unwrap_err(),
            Error::NotAnObject(_)
        ));
    }

    #[test]
    fn serialize_as_raw_json() {
        let document = Document::from_value(catalog()).unwrap();
        assert_eq!(serde_json::to_value(&document).unwrap(), catalog());
    }
}
