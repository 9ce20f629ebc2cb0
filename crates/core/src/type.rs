use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The three kinds of STAC document.
///
/// The type is decided once, when a [Document](crate::Document) is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Type {
    /// A STAC Catalog.
    Catalog,

    /// A STAC Collection.
    Collection,

    /// A STAC Item (a GeoJSON Feature).
    Item,
}

impl Type {
    /// Returns the lowercase name used in schema paths, e.g. `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_core::Type;
    ///
    /// assert_eq!(Type::Collection.schema_name(), "collection");
    /// ```
    pub fn schema_name(&self) -> &'static str {
        match self {
            Type::Catalog => "catalog",
            Type::Collection => "collection",
            Type::Item => "item",
        }
    }

    /// Returns the path of this type's core schema, relative to a schema
    /// host, for a 1.x version of the spec.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_core::{Type, Version};
    ///
    /// let version: Version = "1.0.0".parse().unwrap();
    /// assert_eq!(
    ///     Type::Item.spec_path(&version),
    ///     "/v1.0.0/item-spec/json-schema/item.json"
    /// );
    /// ```
    pub fn spec_path(&self, version: &crate::Version) -> String {
        let name = self.schema_name();
        format!("/v{version}/{name}-spec/json-schema/{name}.json")
    }

    /// Returns true if documents of this type can link to child documents.
    pub fn has_children(&self) -> bool {
        matches!(self, Type::Catalog | Type::Collection)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Catalog => f.write_str("Catalog"),
            Type::Collection => f.write_str("Collection"),
            Type::Item => f.write_str("Item"),
        }
    }
}

impl FromStr for Type {
    type Err = Error;

    fn from_str(s: &str) -> Result<Type> {
        match s.to_ascii_lowercase().as_str() {
            "catalog" => Ok(Type::Catalog),
            "collection" => Ok(Type::Collection),
            "feature" | "item" => Ok(Type::Item),
            _ => Err(Error::UnknownType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Type;
    use rstest::rstest;

    #[rstest]
    #[case("Feature", Type::Item)]
    #[case("Catalog", Type::Catalog)]
    #[case("Collection", Type::Collection)]
    #[case("COLLECTION", Type::Collection)]
    fn parse(#[case] s: &str, #[case] expected: Type) {
        assert_eq!(s.parse::<Type>().unwrap(), expected);
    }

    #[test]
    fn feature_collection_is_unknown() {
        let _ = "FeatureCollection".parse::<Type>().unwrap_err();
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_value(Type::Item).unwrap(), "ITEM");
    }
}
