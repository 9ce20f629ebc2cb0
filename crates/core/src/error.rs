use thiserror::Error;

/// Error enum for crate-specific errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Returned when a STAC object has a field with the wrong JSON type.
    #[error("invalid \"{field}\" field: expected {expected}")]
    InvalidField {
        /// The name of the field.
        field: &'static str,

        /// What the field should have been.
        expected: &'static str,
    },

    /// This string is not a valid STAC version.
    #[error("invalid stac version: {0}")]
    InvalidVersion(String),

    /// Returned when there is not a required field on a STAC object
    #[error("no \"{0}\" field in the JSON object")]
    MissingField(&'static str),

    /// This is not a JSON object.
    #[error("json value is not an object")]
    NotAnObject(serde_json::Value),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Returned when the `type` field of a STAC object does not equal
    /// `"Feature"`, `"Catalog"`, or `"Collection"`, and the type can't be
    /// inferred from the object's structure.
    #[error("unknown \"type\": {0}")]
    UnknownType(String),

    /// [url::ParseError]
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}
