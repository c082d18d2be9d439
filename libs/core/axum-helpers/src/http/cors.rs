use axum::http::{HeaderName, HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::CorsLayer;

use super::REQUEST_ID_HEADER;

/// Creates a CORS layer restricted to `allowed_origins`.
///
/// - Methods used by the API (GET, POST, PUT, DELETE, PATCH, OPTIONS)
/// - Content-Type, Accept and the request ID header
/// - Request ID exposed to browsers
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer that allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Pick the layer for a configured origin list: empty means any origin.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return create_permissive_cors_layer();
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    create_cors_layer(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn preflight(layer: CorsLayer, origin: &str) -> Option<HeaderValue> {
        let app = Router::new().route("/", get(|| async { "ok" })).layer(layer);
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_empty_origin_list_allows_any_origin() {
        let allowed = preflight(cors_layer(&[]), "https://anywhere.example").await;
        assert_eq!(allowed.unwrap(), "*");
    }

    #[tokio::test]
    async fn test_configured_origins_are_enforced() {
        let origins = vec!["https://app.example.com".to_string()];

        let allowed = preflight(cors_layer(&origins), "https://app.example.com").await;
        assert_eq!(allowed.unwrap(), "https://app.example.com");

        let denied = preflight(cors_layer(&origins), "https://evil.example.com").await;
        assert!(denied.is_none());
    }
}
