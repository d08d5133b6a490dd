// storefront_core/src/service/catalog.rs

//! Categories and products.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{StorefrontError, StorefrontResult};
use crate::gate::{require_owner, require_role, SELLER_ONLY};
use crate::model::{Category, CategoryDraft, Product, ProductDraft, User};
use crate::store::Store;

const CATEGORY_NOT_FOUND: &str = "Category not found";
const PARENT_NOT_FOUND: &str = "Parent category not found";
const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Clone)]
pub struct CatalogService {
  store: Arc<dyn Store>,
}

impl CatalogService {
  pub fn new(store: Arc<dyn Store>) -> Self {
    Self { store }
  }

  // --- Categories ---

  pub async fn list_categories(&self) -> StorefrontResult<Vec<Category>> {
    self.store.list_active_categories().await
  }

  #[instrument(name = "catalog::create_category", skip(self, draft), fields(name = %draft.name, parent_id = ?draft.parent_id))]
  pub async fn create_category(&self, draft: CategoryDraft) -> StorefrontResult<Category> {
    draft.validate()?;
    if let Some(parent_id) = draft.parent_id {
      self.active_category(parent_id, PARENT_NOT_FOUND).await?;
    }
    let category = self.store.insert_category(&draft).await?;
    info!(category_id = category.id, "Category created.");
    Ok(category)
  }

  #[instrument(name = "catalog::update_category", skip(self, draft), fields(parent_id = ?draft.parent_id))]
  pub async fn update_category(&self, id: i64, draft: CategoryDraft) -> StorefrontResult<Category> {
    draft.validate()?;
    if self.store.find_category(id).await?.is_none() {
      return Err(StorefrontError::not_found(CATEGORY_NOT_FOUND));
    }
    if let Some(parent_id) = draft.parent_id {
      self.active_category(parent_id, PARENT_NOT_FOUND).await?;
      self.reject_parent_cycle(id, parent_id).await?;
    }
    self
      .store
      .update_category(id, &draft)
      .await?
      .ok_or_else(|| StorefrontError::not_found(CATEGORY_NOT_FOUND))
  }

  /// Idempotent: deactivating an inactive category succeeds.
  #[instrument(name = "catalog::deactivate_category", skip(self))]
  pub async fn deactivate_category(&self, id: i64) -> StorefrontResult<()> {
    if !self.store.set_category_active(id, false).await? {
      return Err(StorefrontError::not_found(CATEGORY_NOT_FOUND));
    }
    info!(category_id = id, "Category marked as inactive.");
    Ok(())
  }

  async fn active_category(&self, id: i64, missing: &'static str) -> StorefrontResult<Category> {
    match self.store.find_category(id).await? {
      Some(category) if category.is_active => Ok(category),
      _ => {
        warn!(category_id = id, "{}", missing);
        Err(StorefrontError::not_found(missing))
      }
    }
  }

  /// Walks up from the proposed parent; meeting `id` again would close a loop.
  async fn reject_parent_cycle(&self, id: i64, parent_id: i64) -> StorefrontResult<()> {
    let mut seen = HashSet::new();
    let mut cursor = Some(parent_id);
    while let Some(current) = cursor {
      if current == id {
        return Err(StorefrontError::validation("A category cannot be its own ancestor"));
      }
      if !seen.insert(current) {
        break;
      }
      cursor = self.store.find_category(current).await?.and_then(|c| c.parent_id);
    }
    Ok(())
  }

  // --- Products ---

  pub async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
    self.store.list_active_products().await
  }

  pub async fn products_in_category(&self, category_id: i64) -> StorefrontResult<Vec<Product>> {
    self.active_category(category_id, CATEGORY_NOT_FOUND).await?;
    self.store.list_active_products_in_category(category_id).await
  }

  pub async fn get_product(&self, id: i64) -> StorefrontResult<Product> {
    self.active_product(id).await
  }

  #[instrument(name = "catalog::create_product", skip(self, actor, draft), fields(seller_id = actor.id, category_id = draft.category_id))]
  pub async fn create_product(&self, actor: &User, draft: ProductDraft) -> StorefrontResult<Product> {
    require_role(actor, SELLER_ONLY)?;
    draft.validate()?;
    self.active_category(draft.category_id, CATEGORY_NOT_FOUND).await?;

    let product = self.store.insert_product(&draft, actor.id).await?;
    info!(product_id = product.id, "Product created.");
    Ok(product)
  }

  #[instrument(name = "catalog::update_product", skip(self, actor, draft), fields(seller_id = actor.id))]
  pub async fn update_product(&self, actor: &User, id: i64, draft: ProductDraft) -> StorefrontResult<Product> {
    require_role(actor, SELLER_ONLY)?;
    draft.validate()?;
    let product = self.active_product(id).await?;
    require_owner(actor, &product, "You can only update your own products")?;
    self.active_category(draft.category_id, CATEGORY_NOT_FOUND).await?;

    self
      .store
      .update_product(id, &draft)
      .await?
      .ok_or_else(|| StorefrontError::not_found(PRODUCT_NOT_FOUND))
  }

  #[instrument(name = "catalog::deactivate_product", skip(self, actor), fields(seller_id = actor.id))]
  pub async fn deactivate_product(&self, actor: &User, id: i64) -> StorefrontResult<()> {
    require_role(actor, SELLER_ONLY)?;
    let product = self.active_product(id).await?;
    require_owner(actor, &product, "You can only delete your own products")?;

    if !self.store.set_product_active(id, false).await? {
      return Err(StorefrontError::not_found(PRODUCT_NOT_FOUND));
    }
    info!(product_id = id, "Product marked as inactive.");
    Ok(())
  }

  pub(crate) async fn active_product(&self, id: i64) -> StorefrontResult<Product> {
    match self.store.find_product(id).await? {
      Some(product) if product.is_active => Ok(product),
      _ => Err(StorefrontError::not_found(PRODUCT_NOT_FOUND)),
    }
  }
}
