//! Product route handlers.
//!
//! Extractor rejections are taken as `Result` so malformed ids and bodies
//! come back in the same JSON error shape as catalog failures.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use shop_catalog_core::ProductId;

use crate::error::Result;
use crate::models::{Product, ProductDraft, ProductResponse};
use crate::state::AppState;

/// List every product.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = state.catalog().get_all_products().await?;
    Ok(Json(products))
}

/// Look up one product. The body is always a list: empty when the id is
/// unknown, one element otherwise.
pub async fn get_product(
    State(state): State<AppState>,
    id: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Vec<ProductResponse>>> {
    let Path(id) = id?;
    let products = state.catalog().get_product_by_id(id).await?;
    Ok(Json(products))
}

/// Create a product from a draft. An `id` in the body overwrites that row.
pub async fn create_product(
    State(state): State<AppState>,
    draft: std::result::Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>> {
    let Json(draft) = draft?;
    let product = state.catalog().save_product(draft).await?;
    Ok(Json(product))
}

/// Replace the fields of an existing product. Responds `null` when the id
/// is unknown.
pub async fn update_product(
    State(state): State<AppState>,
    id: std::result::Result<Path<ProductId>, PathRejection>,
    draft: std::result::Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Option<Product>>> {
    let Path(id) = id?;
    let Json(draft) = draft?;
    let product = state.catalog().update_product(id, draft).await?;
    Ok(Json(product))
}

/// Delete a product. Unknown ids are not an error.
pub async fn delete_product(
    State(state): State<AppState>,
    id: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<()> {
    let Path(id) = id?;
    state.catalog().delete_product(id).await?;
    Ok(())
}
