//! Individual best-practice checks.
//!
//! Each check looks at one document and returns a message if the document
//! doesn't follow the practice.

use stac_validator_core::{Document, LATEST_VERSION, SelfHref, Type, link::SELF_REL};
use std::path::Path;

/// A named best-practice check.
pub type Check = fn(&Document) -> Option<String>;

/// Every check, in the order they are reported.
pub const CHECKS: &[(&str, Check)] = &[
    ("searchable_identifiers", searchable_identifiers),
    ("percent_encoded", percent_encoded),
    ("check_item_id_file_name", check_item_id_file_name),
    ("null_datetime", null_datetime),
    ("check_geometry_null", check_geometry_null),
    ("check_bbox", check_bbox),
    ("check_unlocated", check_unlocated),
    ("check_summaries", check_summaries),
    ("check_links_self", check_links_self),
    ("check_thumbnail", check_thumbnail),
    ("links_title", links_title),
    ("version", version),
];

const THUMBNAIL_MEDIA_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg", "image/webp"];
const THUMBNAIL_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Ids should be lowercase, and only use letters, numbers, `-`, and `_`.
pub fn searchable_identifiers(document: &Document) -> Option<String> {
    let id = document.id()?;
    if id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        None
    } else {
        Some(format!(
            "id '{id}' should only contain lowercase letters, numbers, '-', and '_'"
        ))
    }
}

/// Ids shouldn't need to be percent-encoded in a url.
pub fn percent_encoded(document: &Document) -> Option<String> {
    let id = document.id()?;
    if id.contains([':', '/']) {
        Some(format!("id '{id}' contains ':' or '/', which must be percent-encoded"))
    } else {
        None
    }
}

/// An item's file name should match its id.
pub fn check_item_id_file_name(document: &Document) -> Option<String> {
    if document.r#type() != Type::Item {
        return None;
    }
    let id = document.id()?;
    let stem = Path::new(document.self_href()?).file_stem()?.to_str()?;
    if stem == id {
        None
    } else {
        Some(format!("file name '{stem}' doesn't match item id '{id}'"))
    }
}

/// A null datetime needs a start and end datetime.
pub fn null_datetime(document: &Document) -> Option<String> {
    let properties = item_properties(document)?;
    if properties.get("datetime").is_some_and(|v| v.is_null())
        && (is_missing(properties.get("start_datetime"))
            || is_missing(properties.get("end_datetime")))
    {
        Some("datetime is null, but start_datetime and end_datetime aren't both set".to_string())
    } else {
        None
    }
}

/// Items should have a geometry.
pub fn check_geometry_null(document: &Document) -> Option<String> {
    if document.r#type() == Type::Item && is_missing(document.get("geometry")) {
        Some("item has no geometry".to_string())
    } else {
        None
    }
}

/// Items with a geometry need a bbox.
pub fn check_bbox(document: &Document) -> Option<String> {
    if document.r#type() == Type::Item
        && !is_missing(document.get("geometry"))
        && is_missing(document.get("bbox"))
    {
        Some("item has a geometry but no bbox".to_string())
    } else {
        None
    }
}

/// Items without a geometry shouldn't have a bbox.
pub fn check_unlocated(document: &Document) -> Option<String> {
    if document.r#type() == Type::Item
        && is_missing(document.get("geometry"))
        && !is_missing(document.get("bbox"))
    {
        Some("unlocated item (null geometry) has a bbox".to_string())
    } else {
        None
    }
}

/// Collections should have summaries.
pub fn check_summaries(document: &Document) -> Option<String> {
    if document.r#type() == Type::Collection && is_missing(document.get("summaries")) {
        Some("collection has no summaries".to_string())
    } else {
        None
    }
}

/// Every document should link to itself.
pub fn check_links_self(document: &Document) -> Option<String> {
    if document.links().iter().any(|link| link.is_self()) {
        None
    } else {
        Some(format!("no '{SELF_REL}' link"))
    }
}

/// Thumbnails should be images that browsers can show.
pub fn check_thumbnail(document: &Document) -> Option<String> {
    let bad: Vec<_> = document
        .assets()
        .iter()
        .filter(|(key, asset)| key.as_str() == "thumbnail" || asset.has_role("thumbnail"))
        .filter(|(_, asset)| match asset.r#type.as_deref() {
            Some(media_type) => !THUMBNAIL_MEDIA_TYPES.contains(&media_type),
            None => !Path::new(&asset.href)
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| {
                    THUMBNAIL_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
                }),
        })
        .map(|(key, _)| key.as_str())
        .collect();
    if bad.is_empty() {
        None
    } else {
        Some(format!(
            "thumbnail asset(s) {} should be png, jpeg, or webp",
            bad.join(", ")
        ))
    }
}

/// Child and item links should have titles.
pub fn links_title(document: &Document) -> Option<String> {
    let untitled = document
        .links()
        .iter()
        .filter(|link| (link.is_child() || link.is_item()) && link.title.is_none())
        .count();
    if untitled == 0 {
        None
    } else {
        Some(format!("{untitled} child or item link(s) have no title"))
    }
}

/// Documents should use the latest STAC version.
pub fn version(document: &Document) -> Option<String> {
    match document.version() {
        Some(version) if version.is_latest() => None,
        Some(version) => Some(format!(
            "stac_version {version} isn't the latest ({LATEST_VERSION})"
        )),
        None => Some("no stac_version".to_string()),
    }
}

fn item_properties(document: &Document) -> Option<&serde_json::Map<String, serde_json::Value>> {
    if document.r#type() == Type::Item {
        document.get("properties")?.as_object()
    } else {
        None
    }
}

fn is_missing(value: Option<&serde_json::Value>) -> bool {
    value.is_none_or(|value| value.is_null())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};
    use stac_validator_core::{Document, SelfHref};

    fn item(patch: Value) -> Document {
        let mut value = json!({
            "type": "Feature",
            "stac_version": "1.1.0",
            "id": "an-item",
            "geometry": {"type": "Point", "coordinates": [-105.1, 41.1]},
            "bbox": [-105.1, 41.1, -105.1, 41.1],
            "properties": {"datetime": "2024-01-01T00:00:00Z"},
            "links": [{"rel": "self", "href": "./an-item.json"}],
            "assets": {}
        });
        if let (Value::Object(object), Value::Object(patch)) = (&mut value, patch) {
            object.extend(patch);
        }
        let mut document = Document::from_value(value).unwrap();
        document.set_self_href("/data/an-item.json");
        document
    }

    fn failing(document: &Document) -> Vec<&'static str> {
        super::CHECKS
            .iter()
            .filter(|(_, check)| check(document).is_some())
            .map(|(name, _)| *name)
            .collect()
    }

    #[test]
    fn clean_item() {
        assert!(failing(&item(json!({}))).is_empty());
    }

    #[rstest]
    #[case(json!({"id": "An Item"}), vec!["searchable_identifiers", "check_item_id_file_name"])]
    #[case(
        json!({"id": "a:b"}),
        vec!["searchable_identifiers", "percent_encoded", "check_item_id_file_name"]
    )]
    #[case(json!({"properties": {"datetime": null}}), vec!["null_datetime"])]
    #[case(json!({"geometry": null}), vec!["check_geometry_null", "check_unlocated"])]
    #[case(json!({"geometry": null, "bbox": null}), vec!["check_geometry_null"])]
    #[case(json!({"bbox": null}), vec!["check_bbox"])]
    #[case(json!({"links": []}), vec!["check_links_self"])]
    #[case(json!({"stac_version": "1.0.0"}), vec!["version"])]
    #[case(json!({"assets": {"thumbnail": {"href": "./thumb.tif"}}}), vec!["check_thumbnail"])]
    #[case(
        json!({"assets": {"preview": {
            "href": "./thumb",
            "type": "image/tiff",
            "roles": ["thumbnail"]
        }}}),
        vec!["check_thumbnail"]
    )]
    #[case(json!({"assets": {"thumbnail": {"href": "./thumb.PNG"}}}), vec![])]
    fn item_checks(#[case] patch: Value, #[case] expected: Vec<&str>) {
        assert_eq!(failing(&item(patch)), expected);
    }

    #[test]
    fn null_datetime_with_range() {
        let document = item(json!({"properties": {
            "datetime": null,
            "start_datetime": "2024-01-01T00:00:00Z",
            "end_datetime": "2024-02-01T00:00:00Z"
        }}));
        assert!(super::null_datetime(&document).is_none());
    }

    #[test]
    fn collection() {
        let document = Document::from_value(json!({
            "type": "Collection",
            "stac_version": "1.1.0",
            "id": "a-collection",
            "description": "A collection",
            "license": "MIT",
            "extent": {},
            "links": [
                {"rel": "self", "href": "./collection.json"},
                {"rel": "item", "href": "./an-item.json"},
                {"rel": "item", "href": "./another-item.json", "title": "Another item"}
            ]
        }))
        .unwrap();
        assert_eq!(failing(&document), vec!["check_summaries", "links_title"]);
        assert_eq!(
            super::links_title(&document).unwrap(),
            "1 child or item link(s) have no title"
        );
    }
}
