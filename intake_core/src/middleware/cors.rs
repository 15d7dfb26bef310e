//! CORS (Cross-Origin Resource Sharing) middleware configuration

use crate::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer as TowerCorsLayer};

use super::admin::ADMIN_PASS_HEADER;

const API_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

fn api_headers() -> [HeaderName; 3] {
    [
        HeaderName::from_static("content-type"),
        HeaderName::from_static("accept"),
        HeaderName::from_static(ADMIN_PASS_HEADER),
    ]
}

/// Permissive when no origins are configured, restricted to the list
/// otherwise. Unparseable origins are skipped.
pub fn cors_layer_from_config(config: &CorsConfig) -> TowerCorsLayer {
    if config.allowed_origins.is_empty() {
        return cors_layer_permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    TowerCorsLayer::new()
        .allow_origin(origins)
        .allow_methods(API_METHODS)
        .allow_headers(api_headers())
        .max_age(std::time::Duration::from_secs(3600))
}

pub fn cors_layer_permissive() -> TowerCorsLayer {
    TowerCorsLayer::new()
        .allow_origin(Any)
        .allow_methods(API_METHODS)
        .allow_headers(api_headers())
        .max_age(std::time::Duration::from_secs(3600))
}
