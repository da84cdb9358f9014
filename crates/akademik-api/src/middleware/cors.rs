//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use akademik_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    let any_origin = config.allowed_origins.iter().any(|o| o == "*");
    let any_header = config.allowed_headers.iter().any(|h| h == "*");

    // Origins
    if any_origin {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    // Methods
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    // Headers
    if any_header {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer = layer.allow_headers(headers);
    }

    // Credentials cannot be combined with wildcards.
    if config.supports_credentials {
        if any_origin || any_header {
            warn!("CORS credentials disabled: wildcard origins or headers configured");
        } else {
            layer = layer.allow_credentials(true);
        }
    }

    layer.max_age(Duration::from_secs(config.max_age_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_preflight_allows_configured_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://akademik.example".to_string()],
            allowed_headers: vec!["authorization".to_string(), "content-type".to_string()],
            supports_credentials: true,
            ..CorsConfig::default()
        };
        let app = Router::new()
            .route("/api/me", get(|| async { "ok" }))
            .layer(build_cors_layer(&config));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/me")
                    .header(header::ORIGIN, "https://akademik.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://akademik.example"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[test]
    fn test_wildcard_with_credentials_does_not_panic() {
        let config = CorsConfig {
            supports_credentials: true,
            ..CorsConfig::default()
        };
        let _ = build_cors_layer(&config);
    }
}
