//! Product catalog service.
//!
//! Sits between the HTTP handlers and a [`ProductStore`]: forwards writes,
//! and flattens stored products into [`ProductResponse`] records whose
//! category is reduced to `categoryName`.

mod error;

pub use error::CatalogError;

use std::sync::Arc;

use shop_catalog_core::{CategoryId, CategoryPolicy, Price, ProductId};

use crate::db::{ProductStore, RepositoryError};
use crate::models::{Product, ProductDraft, ProductResponse};

/// Product catalog service.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ProductCatalogService {
    store: Arc<dyn ProductStore>,
    policy: CategoryPolicy,
}

impl std::fmt::Debug for ProductCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCatalogService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ProductCatalogService {
    /// Create a catalog service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>, policy: CategoryPolicy) -> Self {
        Self { store, policy }
    }

    /// The configured category policy.
    #[must_use]
    pub const fn policy(&self) -> CategoryPolicy {
        self.policy
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// All products as listing records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnresolvedCategory` if a product lacks a
    /// category under the `required` policy.
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn get_all_products(&self) -> Result<Vec<ProductResponse>, CatalogError> {
        let products = self.store.find_all().await?;
        self.shape_all(products)
    }

    /// The product with `id` as a zero- or one-element list.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_all_products`].
    pub async fn get_product_by_id(
        &self,
        id: ProductId,
    ) -> Result<Vec<ProductResponse>, CatalogError> {
        match self.store.find_by_id(id).await? {
            Some(product) => Ok(vec![self.shape(product)?]),
            None => Ok(Vec::new()),
        }
    }

    /// Products whose name is exactly `name`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_all_products`].
    pub async fn products_named(&self, name: &str) -> Result<Vec<ProductResponse>, CatalogError> {
        let products = self.store.find_by_name(name).await?;
        self.shape_all(products)
    }

    /// Products in `category_id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_all_products`].
    pub async fn products_in_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductResponse>, CatalogError> {
        let products = self.store.find_by_category_id(category_id).await?;
        self.shape_all(products)
    }

    /// Products priced within `min..=max`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_all_products`].
    pub async fn products_priced_between(
        &self,
        min: Price,
        max: Price,
    ) -> Result<Vec<ProductResponse>, CatalogError> {
        let products = self.store.find_by_price_between(min, max).await?;
        self.shape_all(products)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Persist a product as given (insert without ID, overwrite with one).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingCategory` if the draft has no category
    /// under the `required` policy.
    /// Returns `CatalogError::Repository` if the store rejects the write,
    /// e.g. `RepositoryError::IntegrityViolation` for an unknown category.
    pub async fn save_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        self.check_category(&draft)?;
        let product = self.store.save(draft).await?;
        tracing::info!(product_id = %product.id, "Saved product");
        Ok(product)
    }

    /// Overwrite name, description, price, stock, and category of the
    /// product with `id`. Returns `None` if there is no such product; the
    /// store is left untouched in that case.
    ///
    /// # Errors
    ///
    /// Same as [`Self::save_product`].
    pub async fn update_product(
        &self,
        id: ProductId,
        details: ProductDraft,
    ) -> Result<Option<Product>, CatalogError> {
        let Some(existing) = self.store.find_by_id(id).await? else {
            tracing::debug!(product_id = %id, "Update skipped, product not found");
            return Ok(None);
        };

        self.check_category(&details)?;

        let draft = ProductDraft {
            id: Some(existing.id),
            ..details
        };

        match self.store.save(draft).await {
            Ok(product) => {
                tracing::info!(product_id = %product.id, "Updated product");
                Ok(Some(product))
            }
            // Deleted between the lookup and the write.
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the product with `id`. Deleting a missing product succeeds.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.store.delete_by_id(id).await?;
        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store cannot be reached.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        Ok(self.store.ping().await?)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn check_category(&self, draft: &ProductDraft) -> Result<(), CatalogError> {
        if self.policy.is_required() && draft.category_id.is_none() {
            return Err(CatalogError::MissingCategory);
        }
        Ok(())
    }

    fn shape(&self, product: Product) -> Result<ProductResponse, CatalogError> {
        let category_name = match product.category {
            Some(category) => Some(category.name),
            None if self.policy.is_required() => {
                return Err(CatalogError::UnresolvedCategory(product.id));
            }
            None => None,
        };

        Ok(ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category_name,
        })
    }

    fn shape_all(&self, products: Vec<Product>) -> Result<Vec<ProductResponse>, CatalogError> {
        products.into_iter().map(|p| self.shape(p)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::db::InMemoryProductStore;
    use crate::models::Category;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_owned(),
            description: String::new(),
        }
    }

    fn service_with(policy: CategoryPolicy) -> (ProductCatalogService, Arc<InMemoryProductStore>) {
        let store = Arc::new(InMemoryProductStore::with_categories([
            category(1, "Tools"),
            category(2, "Garden"),
        ]));
        (ProductCatalogService::new(store.clone(), policy), store)
    }

    fn hammer() -> ProductDraft {
        ProductDraft::new("Hammer", Price::from_cents(999), 5)
            .with_description("Claw hammer")
            .with_category(CategoryId::new(1))
    }

    #[tokio::test]
    async fn test_get_all_products_flattens_category() {
        let (service, _) = service_with(CategoryPolicy::Required);
        let saved = service.save_product(hammer()).await.unwrap();

        let all = service.get_all_products().await.unwrap();
        assert_eq!(
            all,
            vec![ProductResponse {
                id: saved.id,
                name: "Hammer".to_owned(),
                description: "Claw hammer".to_owned(),
                price: Price::from_cents(999),
                stock: 5,
                category_name: Some("Tools".to_owned()),
            }]
        );
    }

    #[tokio::test]
    async fn test_get_product_by_id_after_save() {
        let (service, _) = service_with(CategoryPolicy::Required);
        let saved = service.save_product(hammer()).await.unwrap();

        let found = service.get_product_by_id(saved.id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, saved.id);
        assert_eq!(found[0].category_name.as_deref(), Some("Tools"));
    }

    #[tokio::test]
    async fn test_get_product_by_id_missing_is_empty() {
        let (service, _) = service_with(CategoryPolicy::Required);
        let found = service.get_product_by_id(ProductId::new(404)).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none_and_creates_nothing() {
        let (service, store) = service_with(CategoryPolicy::Required);
        let result = service
            .update_product(ProductId::new(9), hammer())
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields_and_keeps_id() {
        let (service, _) = service_with(CategoryPolicy::Required);
        let saved = service.save_product(hammer()).await.unwrap();

        let details = ProductDraft::new("Rake", Price::from_cents(2450), 12)
            .with_description("Leaf rake")
            .with_category(CategoryId::new(2))
            .with_id(ProductId::new(999));

        let updated = service
            .update_product(saved.id, details)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.name, "Rake");
        assert_eq!(updated.description, "Leaf rake");
        assert_eq!(updated.price, Price::from_cents(2450));
        assert_eq!(updated.stock, 12);
        assert_eq!(updated.category, Some(category(2, "Garden")));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (service, store) = service_with(CategoryPolicy::Required);
        let saved = service.save_product(hammer()).await.unwrap();

        service.delete_product(saved.id).await.unwrap();
        service.delete_product(saved.id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_required_policy_rejects_missing_category() {
        let (service, store) = service_with(CategoryPolicy::Required);
        let err = service
            .save_product(ProductDraft::new("Loose", Price::from_cents(100), 1))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::MissingCategory));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_required_policy_reports_uncategorized_rows() {
        let store = Arc::new(InMemoryProductStore::new());
        let permissive = ProductCatalogService::new(store.clone(), CategoryPolicy::Optional);
        let saved = permissive
            .save_product(ProductDraft::new("Loose", Price::from_cents(100), 1))
            .await
            .unwrap();

        let strict = ProductCatalogService::new(store, CategoryPolicy::Required);
        let err = strict.get_all_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::UnresolvedCategory(id) if id == saved.id));
    }

    #[tokio::test]
    async fn test_optional_policy_yields_null_category_name() {
        let (service, _) = service_with(CategoryPolicy::Optional);
        service
            .save_product(ProductDraft::new("Loose", Price::from_cents(100), 1))
            .await
            .unwrap();

        let all = service.get_all_products().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category_name, None);
    }

    #[tokio::test]
    async fn test_unknown_category_is_integrity_violation() {
        let (service, _) = service_with(CategoryPolicy::Required);
        let err = service
            .save_product(hammer().with_category(CategoryId::new(77)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Repository(RepositoryError::IntegrityViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_products_priced_between() {
        let (service, _) = service_with(CategoryPolicy::Required);
        for (name, cents) in [("Chisel", 300), ("Pliers", 750), ("Saw", 1200)] {
            service
                .save_product(
                    ProductDraft::new(name, Price::from_cents(cents), 1)
                        .with_category(CategoryId::new(1)),
                )
                .await
                .unwrap();
        }

        let found = service
            .products_priced_between(Price::from_cents(500), Price::from_cents(1000))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Pliers");
        assert_eq!(found[0].price, Price::from_cents(750));
    }

    #[tokio::test]
    async fn test_products_named_and_in_category() {
        let (service, _) = service_with(CategoryPolicy::Required);
        service.save_product(hammer()).await.unwrap();
        service
            .save_product(
                ProductDraft::new("Hose", Price::from_cents(1999), 3)
                    .with_category(CategoryId::new(2)),
            )
            .await
            .unwrap();

        let named = service.products_named("Hose").await.unwrap();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].category_name.as_deref(), Some("Garden"));
        assert!(service.products_named("hose").await.unwrap().is_empty());

        let tools = service
            .products_in_category(CategoryId::new(1))
            .await
            .unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Hammer");
    }

    #[tokio::test]
    async fn test_update_without_category_is_rejected_and_row_kept() {
        let (service, store) = service_with(CategoryPolicy::Required);
        let saved = service.save_product(hammer()).await.unwrap();

        let err = service
            .update_product(saved.id, ProductDraft::new("Loose", Price::from_cents(100), 1))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::MissingCategory));
        assert_eq!(store.find_by_id(saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_update_with_unknown_category_is_integrity_violation() {
        let (service, store) = service_with(CategoryPolicy::Required);
        let saved = service.save_product(hammer()).await.unwrap();

        let err = service
            .update_product(saved.id, hammer().with_category(CategoryId::new(77)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Repository(RepositoryError::IntegrityViolation(_))
        ));
        assert_eq!(store.find_by_id(saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_get_product_by_id_reports_uncategorized_row() {
        let store = Arc::new(InMemoryProductStore::new());
        let permissive = ProductCatalogService::new(store.clone(), CategoryPolicy::Optional);
        let saved = permissive
            .save_product(ProductDraft::new("Loose", Price::from_cents(100), 1))
            .await
            .unwrap();

        let strict = ProductCatalogService::new(store, CategoryPolicy::Required);
        let err = strict.get_product_by_id(saved.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::UnresolvedCategory(id) if id == saved.id));

        let found = permissive.get_product_by_id(saved.id).await.unwrap();
        assert_eq!(found[0].category_name, None);
    }

    /// Finds its one product, but the row is gone by the time it is written.
    struct VanishingStore {
        product: Product,
    }

    #[async_trait]
    impl ProductStore for VanishingStore {
        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            Ok(vec![self.product.clone()])
        }

        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
            Ok((id == self.product.id).then(|| self.product.clone()))
        }

        async fn find_by_name(&self, _name: &str) -> Result<Vec<Product>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_category_id(
            &self,
            _category_id: CategoryId,
        ) -> Result<Vec<Product>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_price_between(
            &self,
            _min: Price,
            _max: Price,
        ) -> Result<Vec<Product>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn save(&self, _draft: ProductDraft) -> Result<Product, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn delete_by_id(&self, _id: ProductId) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_update_racing_delete_returns_none() {
        let product = Product {
            id: ProductId::new(4),
            name: "Hammer".to_owned(),
            description: String::new(),
            price: Price::from_cents(999),
            stock: 5,
            category: Some(category(1, "Tools")),
        };
        let service = ProductCatalogService::new(
            Arc::new(VanishingStore { product }),
            CategoryPolicy::Required,
        );

        let result = service
            .update_product(ProductId::new(4), hammer())
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
