//! Integration tests for the shop catalog.
//!
//! # Running Tests
//!
//! ```bash
//! # HTTP tests against the in-memory store
//! cargo test -p shop-catalog-integration-tests
//!
//! # PostgreSQL store tests (needs a scratch database)
//! CATALOG_TEST_DATABASE_URL=postgres://localhost/catalog_test \
//!     cargo test -p shop-catalog-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `product_api` - `/api/product` routes driven through the router
//! - `pg_store` - `PgProductStore` and the category/role repositories

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use shop_catalog::build_router;
use shop_catalog::config::CatalogConfig;
use shop_catalog::db::InMemoryProductStore;
use shop_catalog::models::Category;
use shop_catalog::services::ProductCatalogService;
use shop_catalog::state::AppState;
use shop_catalog_core::{CategoryId, CategoryPolicy};

/// Origin the test router allows through CORS.
pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// A catalog router over an in-memory store.
pub struct TestContext {
    pub router: Router,
    pub store: Arc<InMemoryProductStore>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// The body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Category 1, "Tools".
#[must_use]
pub fn tools() -> Category {
    Category {
        id: CategoryId::new(1),
        name: "Tools".to_owned(),
        description: "Hand tools".to_owned(),
    }
}

/// Category 2, "Garden".
#[must_use]
pub fn garden() -> Category {
    Category {
        id: CategoryId::new(2),
        name: "Garden".to_owned(),
        description: "Outdoor supplies".to_owned(),
    }
}

impl TestContext {
    /// Router with the `required` category policy and the two test categories.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(CategoryPolicy::Required)
    }

    /// Router with the given category policy and the two test categories.
    ///
    /// # Panics
    ///
    /// Panics if the test configuration fails to load.
    #[must_use]
    pub fn with_policy(policy: CategoryPolicy) -> Self {
        let config = CatalogConfig::from_lookup(|key| match key {
            // Never connected to; the in-memory store stands in.
            "CATALOG_DATABASE_URL" => Some("postgres://localhost/catalog_unused".to_owned()),
            "CATALOG_CORS_ORIGIN" => Some(TEST_ORIGIN.to_owned()),
            _ => None,
        })
        .expect("test configuration");

        let store = Arc::new(InMemoryProductStore::with_categories([tools(), garden()]));
        let catalog = ProductCatalogService::new(store.clone(), policy);
        let router = build_router(AppState::new(config, catalog));

        Self { router, store }
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send_request(request).await
    }

    /// Send a prebuilt request.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
