//! Product domain types.
//!
//! Three shapes of a product exist:
//! - [`Product`]: the persisted entity with its category resolved.
//! - [`ProductDraft`]: what callers send to create or update a product.
//! - [`ProductResponse`]: the flat listing record with `categoryName`.

use serde::{Deserialize, Serialize};

use shop_catalog_core::{CategoryId, Price, ProductId};

use super::Category;

/// A persisted product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock.
    pub stock: i32,
    /// The category this product belongs to, if any.
    pub category: Option<Category>,
}

/// A product as submitted by a caller.
///
/// An unset `id` means "insert"; a set one means "overwrite that row".
/// The category may arrive flat (`"categoryId": 1`) or nested
/// (`"category": {"id": 1}`); when both are present the flat field wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProductDraftBody", rename_all = "camelCase")]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
}

impl ProductDraft {
    /// Start a new, unsaved draft.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, stock: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            price,
            stock,
            category_id: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category reference.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Target an existing row.
    #[must_use]
    pub const fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Wire form of [`ProductDraft`], accepting both category encodings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDraftBody {
    #[serde(default)]
    id: Option<ProductId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: Price,
    #[serde(default)]
    stock: i32,
    #[serde(default)]
    category_id: Option<CategoryId>,
    #[serde(default)]
    category: Option<CategoryRef>,
}

#[derive(Debug, Deserialize)]
struct CategoryRef {
    id: Option<CategoryId>,
}

impl From<ProductDraftBody> for ProductDraft {
    fn from(body: ProductDraftBody) -> Self {
        let category_id = body
            .category_id
            .or_else(|| body.category.and_then(|c| c.id));

        Self {
            id: body.id,
            name: body.name,
            description: body.description,
            price: body.price,
            stock: body.stock,
            category_id,
        }
    }
}

/// Flat listing record: the product with its category reduced to a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: i32,
    pub category_name: Option<String>,
}
