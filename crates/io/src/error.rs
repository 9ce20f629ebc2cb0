use thiserror::Error;

/// Crate-specific error enum
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Returned when unable to read from a path.
    #[error("{io}: {path}")]
    FromPath {
        /// The [std::io::Error]
        #[source]
        io: std::io::Error,

        /// The path.
        path: String,
    },

    /// Returned when a fetcher that only reads urls is given a local path.
    #[error("local paths are not allowed: {0}")]
    LocalPath(String),

    /// Returned by an in-memory fetcher when it has nothing at an href.
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    /// [reqwest::Error]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    /// [serde_json::Error]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    /// [stac_validator_core::Error]
    Stac(#[from] stac_validator_core::Error),
}

impl Error {
    /// Returns true if the content was retrieved but couldn't be understood,
    /// as opposed to not being retrieved at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_validator_io::Error;
    ///
    /// assert!(!Error::NotFound("catalog.json".to_string()).is_parse());
    /// ```
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::SerdeJson(_) | Error::Stac(_))
    }
}
