use thiserror::Error;

/// Crate-specific error enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// [stac_validator_io::Error]
    #[error(transparent)]
    Io(#[from] stac_validator_io::Error),
}
