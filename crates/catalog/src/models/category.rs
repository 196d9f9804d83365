//! Category domain types.

use serde::{Deserialize, Serialize};

use shop_catalog_core::CategoryId;

/// A grouping that classifies products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name (unique).
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// Input for creating (or refreshing) a category.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
