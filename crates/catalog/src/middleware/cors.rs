//! Cross-origin access for the catalog front end.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Allow the catalog API to be called from exactly one browser origin.
#[must_use]
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static("x-request-id")])
        .expose_headers([header::HeaderName::from_static("x-request-id")])
}
