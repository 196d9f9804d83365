//! Catalog service error types.

use thiserror::Error;

use shop_catalog_core::ProductId;

use crate::db::RepositoryError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A write omitted the category while the policy requires one.
    #[error("product must reference a category")]
    MissingCategory,

    /// A stored product has no category while the policy requires one.
    #[error("product {0} has no category")]
    UnresolvedCategory(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
