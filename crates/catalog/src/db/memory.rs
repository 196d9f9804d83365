//! In-memory product store.
//!
//! Mirrors the `PostgreSQL` store's semantics (generated IDs, foreign-key
//! checks on the category, inclusive price ranges) without a database.
//! Used by tests and local demos.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use shop_catalog_core::{CategoryId, Price, ProductId};

use super::{ProductStore, RepositoryError};
use crate::models::{Category, Product, ProductDraft};

#[derive(Debug, Default)]
struct Tables {
    last_product_id: i64,
    products: BTreeMap<ProductId, StoredProduct>,
    categories: HashMap<CategoryId, Category>,
}

#[derive(Debug, Clone)]
struct StoredProduct {
    name: String,
    description: String,
    price: Price,
    stock: i32,
    category_id: Option<CategoryId>,
}

impl Tables {
    fn resolve(&self, id: ProductId, stored: &StoredProduct) -> Product {
        Product {
            id,
            name: stored.name.clone(),
            description: stored.description.clone(),
            price: stored.price,
            stock: stored.stock,
            category: stored
                .category_id
                .and_then(|category_id| self.categories.get(&category_id).cloned()),
        }
    }

    fn select(&self, predicate: impl Fn(&StoredProduct) -> bool) -> Vec<Product> {
        self.products
            .iter()
            .filter(|(_, stored)| predicate(stored))
            .map(|(id, stored)| self.resolve(*id, stored))
            .collect()
    }
}

/// Product store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    tables: RwLock<Tables>,
}

impl InMemoryProductStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with categories.
    #[must_use]
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.tables.read().await.products.len()
    }

    /// Returns `true` if no products are stored.
    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.products.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.tables.read().await.select(|_| true))
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .get(&id)
            .map(|stored| tables.resolve(id, stored)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.tables.read().await.select(|p| p.name == name))
    }

    async fn find_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .select(|p| p.category_id == Some(category_id)))
    }

    async fn find_by_price_between(
        &self,
        min: Price,
        max: Price,
    ) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .select(|p| min <= p.price && p.price <= max))
    }

    async fn save(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;

        if let Some(category_id) = draft.category_id
            && !tables.categories.contains_key(&category_id)
        {
            return Err(RepositoryError::IntegrityViolation(format!(
                "category {category_id} does not exist"
            )));
        }

        let id = match draft.id {
            Some(id) if tables.products.contains_key(&id) => id,
            Some(_) => return Err(RepositoryError::NotFound),
            None => {
                tables.last_product_id += 1;
                ProductId::new(tables.last_product_id)
            }
        };

        let stored = StoredProduct {
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            category_id: draft.category_id,
        };
        let product = tables.resolve(id, &stored);
        tables.products.insert(id, stored);

        Ok(product)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.tables.write().await.products.remove(&id);
        Ok(())
    }
}
