use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required query parameter wasn't provided.
    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    /// The href isn't an http(s) url.
    #[error("only http and https urls can be validated: {0}")]
    UnsupportedHref(String),

    /// [tokio::task::JoinError]
    #[error(transparent)]
    TokioJoin(#[from] tokio::task::JoinError),

    /// [stac_validator::Error]
    #[error(transparent)]
    Validate(#[from] stac_validator::Error),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_)
            | Error::UnsupportedHref(_)
            | Error::Validate(stac_validator::Error::RootNotFound(_)) => StatusCode::BAD_REQUEST,
            Error::TokioJoin(_) | Error::Validate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
