//! Routes for serving the validator over http.

use crate::{Api, Error, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use stac_validator::Report;
use stac_validator_io::RealizedHref;
use tower_http::trace::TraceLayer;

/// Query parameters for `/api/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    /// The href to validate.
    pub stac_catalog: Option<String>,
}

/// Creates an [axum::Router] from an [Api].
///
/// # Examples
///
/// ```
/// use stac_validator_server::Api;
///
/// let router = stac_validator_server::routes::from_api(Api::new());
/// ```
pub fn from_api(api: Api) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/validate", get(validate).post(validate))
        .layer(TraceLayer::new_for_http())
        .with_state(api)
}

/// Returns a short greeting.
pub async fn root() -> &'static str {
    "stac-validator: GET or POST /api/validate?stac_catalog=<url>"
}

/// Validates the `stac_catalog` href.
///
/// Only http(s) urls are accepted; local paths and `file://` urls are a `400`.
/// The response is `200` whenever validation ran, even if the document is
/// invalid: clients read `valid_stac`.
pub async fn validate(
    State(api): State<Api>,
    Query(params): Query<ValidateParams>,
) -> Result<Json<Report>> {
    let href = params
        .stac_catalog
        .filter(|href| !href.is_empty())
        .ok_or(Error::MissingParameter("stac_catalog"))?;
    if !matches!(
        RealizedHref::from(href.as_str()),
        RealizedHref::Url(ref url) if matches!(url.scheme(), "http" | "https")
    ) {
        return Err(Error::UnsupportedHref(href));
    }
    tracing::info!("validating href={href}");
    let report = api.validate(href).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::from_api;
    use crate::Api;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use stac_validator_io::MemoryFetcher;
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;

    const CATALOG_SCHEMA: &str =
        "https://schemas.stacspec.org/v1.0.0/catalog-spec/json-schema/catalog.json";

    fn api() -> Api {
        let fetcher = MemoryFetcher::new()
            .with_json(
                CATALOG_SCHEMA,
                json!({"type": "object", "required": ["id", "description"]}),
            )
            .with_json(
                "https://stac.test/catalog.json",
                json!({
                    "type": "Catalog",
                    "stac_version": "1.0.0",
                    "id": "a-catalog",
                    "description": "A catalog",
                    "links": [{"rel": "child", "href": "./child.json"}]
                }),
            )
            .with_json(
                "https://stac.test/invalid.json",
                json!({
                    "type": "Catalog",
                    "stac_version": "1.0.0",
                    "id": "a-catalog",
                    "links": []
                }),
            );
        Api::new().with_fetcher(Arc::new(fetcher))
    }

    async fn request(method: &str, uri: &str) -> (StatusCode, Value) {
        request_with(api(), method, uri).await
    }

    async fn request_with(api: Api, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = from_api(api)
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn root() {
        let response = from_api(api())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn validate_get() {
        let (status, report) = request(
            "GET",
            "/api/validate?stac_catalog=https://stac.test/catalog.json",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.as_array().unwrap().len(), 1);
        assert_eq!(report[0]["valid_stac"], true);
        assert_eq!(report[0]["path"], "https://stac.test/catalog.json");
    }

    #[tokio::test]
    async fn validate_post_invalid() {
        let (status, report) = request(
            "POST",
            "/api/validate?stac_catalog=https://stac.test/invalid.json",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report[0]["valid_stac"], false);
        assert_eq!(report[0]["error_type"], "ValidationError");
    }

    #[tokio::test]
    async fn validate_unreachable() {
        let (status, report) = request(
            "GET",
            "/api/validate?stac_catalog=https://stac.test/nope.json",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report[0]["error_type"], "FetchError");
    }

    #[tokio::test]
    async fn missing_parameter() {
        let (status, body) = request("GET", "/api/validate").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing query parameter: stac_catalog");
    }

    #[tokio::test]
    async fn local_path_rejected() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("catalog.json");
        std::fs::write(&path, b"{}").unwrap();
        for href in [
            path.to_str().unwrap().to_string(),
            format!("file://{}", path.display()),
            "catalog.json".to_string(),
        ] {
            let (status, body) = request_with(
                Api::new(),
                "GET",
                &format!("/api/validate?stac_catalog={href}"),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{href}");
            assert_eq!(
                body["error"],
                format!("only http and https urls can be validated: {href}")
            );
        }
    }

    #[tokio::test]
    async fn local_extension_not_read() {
        let tempdir = tempfile::tempdir().unwrap();
        let schema = tempdir.path().join("schema.json");
        std::fs::write(&schema, br#"{"type": "object"}"#).unwrap();
        let schema = schema.to_str().unwrap();
        let mut server = mockito::Server::new_async().await;
        let catalog = server
            .mock("GET", "/catalog.json")
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "type": "Catalog",
                    "stac_extensions": [schema],
                    "id": "a-catalog",
                    "description": "A catalog",
                    "links": []
                })
                .to_string(),
            )
            .create_async()
            .await;
        let (status, report) = request_with(
            Api::new().with_timeout(Duration::from_secs(5)),
            "GET",
            &format!("/api/validate?stac_catalog={}/catalog.json", server.url()),
        )
        .await;
        catalog.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report[0]["valid_stac"], false);
        let violation = report[0]["violations"]
            .as_array()
            .unwrap()
            .iter()
            .find(|violation| violation["schema"] == schema)
            .unwrap();
        assert_eq!(violation["kind"], "SchemaResolutionError");
        assert!(
            violation["message"]
                .as_str()
                .unwrap()
                .contains("local paths are not allowed")
        );
    }
}
