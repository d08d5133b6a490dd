// storefront_core/src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::Store;
use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{Category, CategoryDraft, NewUser, Product, ProductDraft, Review, ReviewDraft, User};
use crate::service::rating::{round_rating, EMPTY_RATING};

#[derive(Default)]
struct Tables {
  users: BTreeMap<i64, User>,
  categories: BTreeMap<i64, Category>,
  products: BTreeMap<i64, Product>,
  reviews: BTreeMap<i64, Review>,
  last_id: i64,
}

impl Tables {
  // Ids are unique across tables here; Postgres keeps one sequence per table.
  // Nothing relies on either scheme beyond ascending order.
  fn next_id(&mut self) -> i64 {
    self.last_id += 1;
    self.last_id
  }
}

/// Process-local [`Store`] backed by ordered maps.
///
/// Lock guards are taken and dropped inside synchronous code; none is ever
/// held across an `.await`.
#[derive(Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl Store for MemoryStore {
  async fn find_user_by_email(&self, email: &str) -> StorefrontResult<Option<User>> {
    let tables = self.tables.read();
    Ok(tables.users.values().find(|u| u.email == email).cloned())
  }

  async fn insert_user(&self, user: NewUser) -> StorefrontResult<User> {
    let mut tables = self.tables.write();
    if tables.users.values().any(|u| u.email == user.email) {
      return Err(StorefrontError::Conflict("Email already registered".to_string()));
    }
    let id = tables.next_id();
    let row = User {
      id,
      email: user.email,
      hashed_password: user.hashed_password,
      role: user.role,
      is_active: true,
    };
    tables.users.insert(id, row.clone());
    Ok(row)
  }

  async fn set_user_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    let mut tables = self.tables.write();
    Ok(tables.users.get_mut(&id).map(|row| row.is_active = active).is_some())
  }

  async fn list_active_categories(&self) -> StorefrontResult<Vec<Category>> {
    let tables = self.tables.read();
    Ok(tables.categories.values().filter(|c| c.is_active).cloned().collect())
  }

  async fn find_category(&self, id: i64) -> StorefrontResult<Option<Category>> {
    Ok(self.tables.read().categories.get(&id).cloned())
  }

  async fn insert_category(&self, draft: &CategoryDraft) -> StorefrontResult<Category> {
    let mut tables = self.tables.write();
    let id = tables.next_id();
    let row = Category {
      id,
      name: draft.name.clone(),
      parent_id: draft.parent_id,
      is_active: true,
    };
    tables.categories.insert(id, row.clone());
    Ok(row)
  }

  async fn update_category(&self, id: i64, draft: &CategoryDraft) -> StorefrontResult<Option<Category>> {
    let mut tables = self.tables.write();
    Ok(tables.categories.get_mut(&id).map(|row| {
      row.name = draft.name.clone();
      row.parent_id = draft.parent_id;
      row.clone()
    }))
  }

  async fn set_category_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    let mut tables = self.tables.write();
    Ok(tables.categories.get_mut(&id).map(|row| row.is_active = active).is_some())
  }

  async fn list_active_products(&self) -> StorefrontResult<Vec<Product>> {
    let tables = self.tables.read();
    Ok(tables.products.values().filter(|p| p.is_active).cloned().collect())
  }

  async fn list_active_products_in_category(&self, category_id: i64) -> StorefrontResult<Vec<Product>> {
    let tables = self.tables.read();
    Ok(
      tables
        .products
        .values()
        .filter(|p| p.is_active && p.category_id == category_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_product(&self, id: i64) -> StorefrontResult<Option<Product>> {
    Ok(self.tables.read().products.get(&id).cloned())
  }

  async fn insert_product(&self, draft: &ProductDraft, seller_id: i64) -> StorefrontResult<Product> {
    let mut tables = self.tables.write();
    let id = tables.next_id();
    let row = Product {
      id,
      name: draft.name.clone(),
      description: draft.description.clone(),
      price: draft.price,
      image_url: draft.image_url.clone(),
      stock: draft.stock,
      rating: 0.0,
      is_active: true,
      category_id: draft.category_id,
      seller_id,
    };
    tables.products.insert(id, row.clone());
    Ok(row)
  }

  async fn update_product(&self, id: i64, draft: &ProductDraft) -> StorefrontResult<Option<Product>> {
    let mut tables = self.tables.write();
    Ok(tables.products.get_mut(&id).map(|row| {
      row.name = draft.name.clone();
      row.description = draft.description.clone();
      row.price = draft.price;
      row.image_url = draft.image_url.clone();
      row.stock = draft.stock;
      row.category_id = draft.category_id;
      row.clone()
    }))
  }

  async fn set_product_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    let mut tables = self.tables.write();
    Ok(tables.products.get_mut(&id).map(|row| row.is_active = active).is_some())
  }

  async fn recompute_rating(&self, product_id: i64) -> StorefrontResult<Option<f64>> {
    // One write guard covers both the read of the reviews and the write of the rating.
    let mut tables = self.tables.write();
    let (sum, count) = tables
      .reviews
      .values()
      .filter(|r| r.is_active && r.product_id == product_id)
      .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r.grade), count + 1));
    let rating = if count > 0 {
      round_rating(sum as f64 / count as f64)
    } else {
      EMPTY_RATING
    };
    Ok(tables.products.get_mut(&product_id).map(|row| {
      row.rating = rating;
      rating
    }))
  }

  async fn list_active_reviews(&self) -> StorefrontResult<Vec<Review>> {
    let tables = self.tables.read();
    Ok(tables.reviews.values().filter(|r| r.is_active).cloned().collect())
  }

  async fn list_active_reviews_for_product(&self, product_id: i64) -> StorefrontResult<Vec<Review>> {
    let tables = self.tables.read();
    Ok(
      tables
        .reviews
        .values()
        .filter(|r| r.is_active && r.product_id == product_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_review(&self, id: i64) -> StorefrontResult<Option<Review>> {
    Ok(self.tables.read().reviews.get(&id).cloned())
  }

  async fn insert_review(&self, user_id: i64, draft: &ReviewDraft) -> StorefrontResult<Review> {
    let mut tables = self.tables.write();
    let id = tables.next_id();
    let row = Review {
      id,
      user_id,
      product_id: draft.product_id,
      comment: draft.comment.clone(),
      comment_date: Utc::now(),
      grade: draft.grade,
      is_active: true,
    };
    tables.reviews.insert(id, row.clone());
    Ok(row)
  }

  async fn set_review_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    let mut tables = self.tables.write();
    Ok(tables.reviews.get_mut(&id).map(|row| row.is_active = active).is_some())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Role;

  #[tokio::test]
  async fn duplicate_email_is_a_conflict() {
    let store = MemoryStore::new();
    let new_user = || NewUser {
      email: "dup@example.com".into(),
      hashed_password: "h".into(),
      role: Role::Buyer,
    };
    store.insert_user(new_user()).await.unwrap();
    let err = store.insert_user(new_user()).await.unwrap_err();
    assert!(matches!(err, StorefrontError::Conflict(_)));
  }

  #[tokio::test]
  async fn recompute_ignores_inactive_reviews() {
    let store = MemoryStore::new();
    let cat = store
      .insert_category(&CategoryDraft {
        name: "Tools".into(),
        parent_id: None,
      })
      .await
      .unwrap();
    let product = store
      .insert_product(
        &ProductDraft {
          name: "Hammer".into(),
          description: None,
          price: 9.0,
          image_url: None,
          stock: 1,
          category_id: cat.id,
        },
        1,
      )
      .await
      .unwrap();
    let review = |grade| ReviewDraft {
      product_id: product.id,
      comment: None,
      grade,
    };
    assert_eq!(store.recompute_rating(product.id).await.unwrap(), Some(0.0));

    let five = store.insert_review(1, &review(5)).await.unwrap();
    store.insert_review(1, &review(2)).await.unwrap();
    assert_eq!(store.recompute_rating(product.id).await.unwrap(), Some(3.5));

    store.set_review_active(five.id, false).await.unwrap();
    assert_eq!(store.recompute_rating(product.id).await.unwrap(), Some(2.0));
    assert_eq!(store.find_product(product.id).await.unwrap().unwrap().rating, 2.0);
  }

  #[tokio::test]
  async fn soft_delete_keeps_row_but_hides_it_from_listing() {
    let store = MemoryStore::new();
    let draft = CategoryDraft {
      name: "Garden".into(),
      parent_id: None,
    };
    let cat = store.insert_category(&draft).await.unwrap();
    assert!(store.set_category_active(cat.id, false).await.unwrap());

    assert!(store.list_active_categories().await.unwrap().is_empty());
    let row = store.find_category(cat.id).await.unwrap().unwrap();
    assert!(!row.is_active);
  }

  #[tokio::test]
  async fn flag_flip_on_missing_row_reports_false() {
    let store = MemoryStore::new();
    assert!(!store.set_product_active(404, false).await.unwrap());
    assert!(!store.set_review_active(404, false).await.unwrap());
    assert_eq!(store.recompute_rating(404).await.unwrap(), None);
  }
}
