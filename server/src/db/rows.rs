// storefront_server/src/db/rows.rs

//! Raw table rows as sqlx decodes them, converted into domain models.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use storefront::{Category, Product, Review, Role, StorefrontError, User};

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
  pub id: i64,
  pub email: String,
  pub hashed_password: String,
  pub role: String,
  pub is_active: bool,
}

impl TryFrom<UserRow> for User {
  type Error = StorefrontError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    // The CHECK constraint makes a bad role a storage fault, not a client one.
    let role: Role = row.role.parse().map_err(|_| StorefrontError::Storage {
      source: anyhow::anyhow!("user {} has unknown role '{}'", row.id, row.role),
    })?;
    Ok(User {
      id: row.id,
      email: row.email,
      hashed_password: row.hashed_password,
      role,
      is_active: row.is_active,
    })
  }
}

#[derive(Debug, FromRow)]
pub(crate) struct CategoryRow {
  pub id: i64,
  pub name: String,
  pub parent_id: Option<i64>,
  pub is_active: bool,
}

impl From<CategoryRow> for Category {
  fn from(row: CategoryRow) -> Self {
    Category {
      id: row.id,
      name: row.name,
      parent_id: row.parent_id,
      is_active: row.is_active,
    }
  }
}

#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  pub price: f64,
  pub image_url: Option<String>,
  pub stock: i32,
  pub rating: f64,
  pub is_active: bool,
  pub category_id: i64,
  pub seller_id: i64,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      name: row.name,
      description: row.description,
      price: row.price,
      image_url: row.image_url,
      stock: row.stock,
      rating: row.rating,
      is_active: row.is_active,
      category_id: row.category_id,
      seller_id: row.seller_id,
    }
  }
}

#[derive(Debug, FromRow)]
pub(crate) struct ReviewRow {
  pub id: i64,
  pub user_id: i64,
  pub product_id: i64,
  pub comment: Option<String>,
  pub comment_date: DateTime<Utc>,
  pub grade: i32,
  pub is_active: bool,
}

impl From<ReviewRow> for Review {
  fn from(row: ReviewRow) -> Self {
    Review {
      id: row.id,
      user_id: row.user_id,
      product_id: row.product_id,
      comment: row.comment,
      comment_date: row.comment_date,
      grade: row.grade,
      is_active: row.is_active,
    }
  }
}
