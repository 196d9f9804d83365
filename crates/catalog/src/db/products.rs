//! Product persistence.
//!
//! [`ProductStore`] is the seam between the catalog service and storage.
//! [`PgProductStore`] implements it on `PostgreSQL`; every read joins the
//! category in the same statement so products come back with their
//! category resolved.

use async_trait::async_trait;
use sqlx::PgPool;

use shop_catalog_core::{CategoryId, Price, ProductId};

use super::RepositoryError;
use crate::models::{Category, Product, ProductDraft};

/// Persistence operations over products.
///
/// Each method is a single statement against the backend; no transaction
/// spans more than one call.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, in primary-key order.
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// The product with `id`, or `None`.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Products whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError>;

    /// Products in the given category.
    async fn find_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Products priced within `min..=max`.
    async fn find_by_price_between(
        &self,
        min: Price,
        max: Price,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Insert the draft when it has no ID, otherwise overwrite that row.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if the draft targets a missing row.
    /// - `RepositoryError::IntegrityViolation` if the category does not exist.
    async fn save(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    /// Remove the product if it exists. Absent IDs are not an error.
    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

// =============================================================================
// Internal Row Types
// =============================================================================

/// Product joined with its (optional) category.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    stock: i32,
    category_id: Option<CategoryId>,
    category_name: Option<String>,
    category_description: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(Category {
                id,
                name,
                description: row.category_description.unwrap_or_default(),
            }),
            (None, _) => None,
            (Some(id), None) => {
                return Err(RepositoryError::DataCorruption(format!(
                    "product {} references missing category {id}",
                    row.id
                )));
            }
        };

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            category,
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, RepositoryError> {
    rows.into_iter().map(Product::try_from).collect()
}

// =============================================================================
// PostgreSQL Store
// =============================================================================

/// `PostgreSQL`-backed product store.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            WITH saved AS (
                INSERT INTO product (name, description, price, stock, categoryid)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, name, description, price, stock, categoryid
            )
            SELECT
                p.id, p.name, p.description, p.price, p.stock,
                p.categoryid AS category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM saved p
            LEFT JOIN category c ON c.id = p.categoryid
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.stock)
        .bind(draft.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        row.try_into()
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            WITH saved AS (
                UPDATE product
                SET name = $2, description = $3, price = $4, stock = $5, categoryid = $6
                WHERE id = $1
                RETURNING id, name, description, price, stock, categoryid
            )
            SELECT
                p.id, p.name, p.description, p.price, p.stock,
                p.categoryid AS category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM saved p
            LEFT JOIN category c ON c.id = p.categoryid
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.stock)
        .bind(draft.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                p.id, p.name, p.description, p.price, p.stock,
                p.categoryid AS category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM product p
            LEFT JOIN category c ON c.id = p.categoryid
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                p.id, p.name, p.description, p.price, p.stock,
                p.categoryid AS category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM product p
            LEFT JOIN category c ON c.id = p.categoryid
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                p.id, p.name, p.description, p.price, p.stock,
                p.categoryid AS category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM product p
            LEFT JOIN category c ON c.id = p.categoryid
            WHERE p.name = $1
            ORDER BY p.id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    async fn find_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                p.id, p.name, p.description, p.price, p.stock,
                p.categoryid AS category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM product p
            JOIN category c ON c.id = p.categoryid
            WHERE p.categoryid = $1
            ORDER BY p.id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    async fn find_by_price_between(
        &self,
        min: Price,
        max: Price,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                p.id, p.name, p.description, p.price, p.stock,
                p.categoryid AS category_id,
                c.name AS category_name,
                c.description AS category_description
            FROM product p
            LEFT JOIN category c ON c.id = p.categoryid
            WHERE p.price BETWEEN $1 AND $2
            ORDER BY p.id
            "#,
        )
        .bind(min)
        .bind(max)
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    async fn save(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        match draft.id {
            None => self.insert(&draft).await,
            Some(id) => self.update(id, &draft).await,
        }
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(product_id = %id, rows = result.rows_affected(), "Deleted product");
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
