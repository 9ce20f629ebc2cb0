use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Create a STAC object from JSON.
pub trait FromJson: DeserializeOwned {
    /// Creates an object from JSON bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_core::{Document, FromJson, Type};
    ///
    /// let json = br#"{
    ///     "type": "Feature",
    ///     "stac_version": "1.0.0",
    ///     "id": "an-id",
    ///     "geometry": null,
    ///     "properties": {},
    ///     "links": [],
    ///     "assets": {}
    /// }"#;
    /// let document = Document::from_json_slice(json).unwrap();
    /// assert_eq!(document.r#type(), Type::Item);
    /// ```
    fn from_json_slice(slice: &[u8]) -> Result<Self> {
        serde_json::from_slice(slice).map_err(Error::from)
    }
}

impl<T: DeserializeOwned> FromJson for T {}
