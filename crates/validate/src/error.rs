use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// [stac_validator_io::Error]
    #[error(transparent)]
    Io(#[from] stac_validator_io::Error),

    /// [jsonschema::ValidationError], returned when a schema doesn't compile.
    #[error(transparent)]
    JsonschemaValidation(#[from] Box<jsonschema::ValidationError<'static>>),

    /// The root href is a local path that doesn't exist.
    #[error("no such file: {0}")]
    RootNotFound(String),

    /// A schema could not be determined, fetched, or compiled.
    #[error("could not resolve schema {schema}: {message}")]
    SchemaResolution {
        /// The schema source (an href, or a description of what was missing).
        schema: String,

        /// Why the schema couldn't be resolved.
        message: String,
    },
}

/// The kind of problem a [Violation] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    /// The document could not be retrieved.
    FetchError,

    /// The document was retrieved but isn't JSON, or isn't a STAC object.
    ParseError,

    /// A schema could not be determined, fetched, or compiled.
    SchemaResolutionError,

    /// The document doesn't conform to a schema.
    ValidationError,

    /// A link target could not be retrieved.
    LinkError,

    /// An asset could not be retrieved.
    AssetError,
}

/// One problem with one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// What kind of problem this is.
    pub kind: ViolationKind,

    /// The schema that produced this violation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// A JSON pointer to the offending part of the document, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_path: Option<String>,

    /// A human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation without a schema or instance path.
    pub fn new(kind: ViolationKind, message: impl ToString) -> Violation {
        Violation {
            kind,
            schema: None,
            instance_path: None,
            message: message.to_string(),
        }
    }

    pub(crate) fn from_jsonschema(
        error: &jsonschema::ValidationError<'_>,
        schema: &str,
    ) -> Violation {
        let instance_path = error.instance_path.to_string();
        Violation {
            kind: ViolationKind::ValidationError,
            schema: Some(schema.to_string()),
            instance_path: if instance_path.is_empty() {
                None
            } else {
                Some(instance_path)
            },
            message: error.to_string(),
        }
    }

    pub(crate) fn from_read_error(error: &stac_validator_io::Error) -> Violation {
        if error.is_parse() {
            Violation::new(ViolationKind::ParseError, error)
        } else {
            Violation::new(ViolationKind::FetchError, error)
        }
    }

    pub(crate) fn from_resolution_error(error: &Error) -> Violation {
        let mut violation = Violation::new(ViolationKind::SchemaResolutionError, error);
        if let Error::SchemaResolution { schema, .. } = error {
            violation.schema = Some(schema.clone());
        }
        violation
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(schema) = self.schema.as_ref() {
            write!(f, "[{schema}] ")?;
        }
        if let Some(instance_path) = self.instance_path.as_ref() {
            write!(f, "{instance_path}: ")?;
        }
        f.write_str(&self.message)
    }
}
