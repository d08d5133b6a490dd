// storefront_core/src/store/mod.rs

//! Persistence seam. Services only ever talk to an `Arc<dyn Store>`; the
//! server wires a PostgreSQL implementation, tests use [`MemoryStore`].
//!
//! `find_*` lookups return rows regardless of `is_active`; callers decide
//! whether an inactive row counts as absent. `list_*` reads only return
//! active rows, ordered by id ascending.

use async_trait::async_trait;

use crate::error::StorefrontResult;
use crate::model::{Category, CategoryDraft, NewUser, Product, ProductDraft, Review, ReviewDraft, User};

pub mod memory;

pub use memory::MemoryStore;

#[async_trait]
pub trait Store: Send + Sync + 'static {
  // --- Users ---
  async fn find_user_by_email(&self, email: &str) -> StorefrontResult<Option<User>>;

  /// Fails with `Conflict` when the email is already taken.
  async fn insert_user(&self, user: NewUser) -> StorefrontResult<User>;

  /// Account suspension. A deactivated user can neither log in nor use
  /// previously issued tokens.
  async fn set_user_active(&self, id: i64, active: bool) -> StorefrontResult<bool>;

  // --- Categories ---
  async fn list_active_categories(&self) -> StorefrontResult<Vec<Category>>;

  async fn find_category(&self, id: i64) -> StorefrontResult<Option<Category>>;

  async fn insert_category(&self, draft: &CategoryDraft) -> StorefrontResult<Category>;

  /// Overwrites name and parent. `None` when no row has this id.
  async fn update_category(&self, id: i64, draft: &CategoryDraft) -> StorefrontResult<Option<Category>>;

  /// Returns false when no row has this id.
  async fn set_category_active(&self, id: i64, active: bool) -> StorefrontResult<bool>;

  // --- Products ---
  async fn list_active_products(&self) -> StorefrontResult<Vec<Product>>;

  async fn list_active_products_in_category(&self, category_id: i64) -> StorefrontResult<Vec<Product>>;

  async fn find_product(&self, id: i64) -> StorefrontResult<Option<Product>>;

  /// New products start active with a 0.0 rating.
  async fn insert_product(&self, draft: &ProductDraft, seller_id: i64) -> StorefrontResult<Product>;

  /// Overwrites the client-editable fields; seller and rating are untouched.
  async fn update_product(&self, id: i64, draft: &ProductDraft) -> StorefrontResult<Option<Product>>;

  async fn set_product_active(&self, id: i64, active: bool) -> StorefrontResult<bool>;

  /// Sets the rating to the mean grade of the product's active reviews,
  /// rounded to two places (0.0 with none), and returns it. Reading the
  /// reviews and writing the rating is one atomic step. `None` when no
  /// product has this id.
  async fn recompute_rating(&self, product_id: i64) -> StorefrontResult<Option<f64>>;

  // --- Reviews ---
  async fn list_active_reviews(&self) -> StorefrontResult<Vec<Review>>;

  async fn list_active_reviews_for_product(&self, product_id: i64) -> StorefrontResult<Vec<Review>>;

  async fn find_review(&self, id: i64) -> StorefrontResult<Option<Review>>;

  /// Stamps `comment_date` with the current time; new reviews start active.
  async fn insert_review(&self, user_id: i64, draft: &ReviewDraft) -> StorefrontResult<Review>;

  async fn set_review_active(&self, id: i64, active: bool) -> StorefrontResult<bool>;
}
