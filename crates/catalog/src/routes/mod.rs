//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (store ping)
//!
//! # Products
//! GET    /api/product          - All products
//! POST   /api/product          - Create product
//! GET    /api/product/{id}     - Zero or one product, as a list
//! PUT    /api/product/{id}     - Update product (null if missing)
//! DELETE /api/product/{id}     - Delete product
//! ```

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}

/// Create all routes for the catalog.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/product", product_routes())
}
