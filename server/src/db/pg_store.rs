// storefront_server/src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, instrument};

use super::rows::{CategoryRow, ProductRow, ReviewRow, UserRow};
use storefront::model::NewUser;
use storefront::{
  Category, CategoryDraft, Product, ProductDraft, Review, ReviewDraft, Store, StorefrontError, StorefrontResult, User,
};

const USER_COLUMNS: &str = "id, email, hashed_password, role, is_active";
const CATEGORY_COLUMNS: &str = "id, name, parent_id, is_active";
const PRODUCT_COLUMNS: &str =
  "id, name, description, price, image_url, stock, rating, is_active, category_id, seller_id";
const REVIEW_COLUMNS: &str = "id, user_id, product_id, comment, comment_date, grade, is_active";

fn storage(err: sqlx::Error) -> StorefrontError {
  error!("Database operation failed: {}", err);
  StorefrontError::Storage { source: err.into() }
}

/// [`Store`] over a PostgreSQL pool, using runtime-checked queries.
#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn flip(&self, table: &'static str, id: i64, active: bool) -> StorefrontResult<bool> {
    let sql = format!("UPDATE {} SET is_active = $1 WHERE id = $2", table);
    let result = sqlx::query(&sql)
      .bind(active)
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(storage)?;
    Ok(result.rows_affected() > 0)
  }
}

#[async_trait]
impl Store for PgStore {
  async fn find_user_by_email(&self, email: &str) -> StorefrontResult<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
    let row: Option<UserRow> = sqlx::query_as(&sql)
      .bind(email)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)?;
    row.map(User::try_from).transpose()
  }

  #[instrument(name = "pg::insert_user", skip(self, user), fields(email = %user.email))]
  async fn insert_user(&self, user: NewUser) -> StorefrontResult<User> {
    let sql = format!(
      "INSERT INTO users (email, hashed_password, role) VALUES ($1, $2, $3) RETURNING {}",
      USER_COLUMNS
    );
    let row: UserRow = sqlx::query_as(&sql)
      .bind(&user.email)
      .bind(&user.hashed_password)
      .bind(user.role.as_str())
      .fetch_one(&self.pool)
      .await
      .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
          StorefrontError::Conflict("Email already registered".to_string())
        }
        _ => storage(e),
      })?;
    User::try_from(row)
  }

  async fn set_user_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    self.flip("users", id, active).await
  }

  async fn list_active_categories(&self) -> StorefrontResult<Vec<Category>> {
    let sql = format!("SELECT {} FROM categories WHERE is_active ORDER BY id", CATEGORY_COLUMNS);
    let rows: Vec<CategoryRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await.map_err(storage)?;
    Ok(rows.into_iter().map(Category::from).collect())
  }

  async fn find_category(&self, id: i64) -> StorefrontResult<Option<Category>> {
    let sql = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
    let row: Option<CategoryRow> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.map(Category::from))
  }

  async fn insert_category(&self, draft: &CategoryDraft) -> StorefrontResult<Category> {
    let sql = format!(
      "INSERT INTO categories (name, parent_id) VALUES ($1, $2) RETURNING {}",
      CATEGORY_COLUMNS
    );
    let row: CategoryRow = sqlx::query_as(&sql)
      .bind(&draft.name)
      .bind(draft.parent_id)
      .fetch_one(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.into())
  }

  async fn update_category(&self, id: i64, draft: &CategoryDraft) -> StorefrontResult<Option<Category>> {
    let sql = format!(
      "UPDATE categories SET name = $1, parent_id = $2 WHERE id = $3 RETURNING {}",
      CATEGORY_COLUMNS
    );
    let row: Option<CategoryRow> = sqlx::query_as(&sql)
      .bind(&draft.name)
      .bind(draft.parent_id)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.map(Category::from))
  }

  async fn set_category_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    self.flip("categories", id, active).await
  }

  async fn list_active_products(&self) -> StorefrontResult<Vec<Product>> {
    let sql = format!("SELECT {} FROM products WHERE is_active ORDER BY id", PRODUCT_COLUMNS);
    let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await.map_err(storage)?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn list_active_products_in_category(&self, category_id: i64) -> StorefrontResult<Vec<Product>> {
    let sql = format!(
      "SELECT {} FROM products WHERE is_active AND category_id = $1 ORDER BY id",
      PRODUCT_COLUMNS
    );
    let rows: Vec<ProductRow> = sqlx::query_as(&sql)
      .bind(category_id)
      .fetch_all(&self.pool)
      .await
      .map_err(storage)?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn find_product(&self, id: i64) -> StorefrontResult<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.map(Product::from))
  }

  async fn insert_product(&self, draft: &ProductDraft, seller_id: i64) -> StorefrontResult<Product> {
    let sql = format!(
      "INSERT INTO products (name, description, price, image_url, stock, category_id, seller_id) \
       VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
      PRODUCT_COLUMNS
    );
    let row: ProductRow = sqlx::query_as(&sql)
      .bind(&draft.name)
      .bind(&draft.description)
      .bind(draft.price)
      .bind(&draft.image_url)
      .bind(draft.stock)
      .bind(draft.category_id)
      .bind(seller_id)
      .fetch_one(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.into())
  }

  async fn update_product(&self, id: i64, draft: &ProductDraft) -> StorefrontResult<Option<Product>> {
    let sql = format!(
      "UPDATE products SET name = $1, description = $2, price = $3, image_url = $4, stock = $5, category_id = $6 \
       WHERE id = $7 RETURNING {}",
      PRODUCT_COLUMNS
    );
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(&draft.name)
      .bind(&draft.description)
      .bind(draft.price)
      .bind(&draft.image_url)
      .bind(draft.stock)
      .bind(draft.category_id)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.map(Product::from))
  }

  async fn set_product_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    self.flip("products", id, active).await
  }

  #[instrument(name = "pg::recompute_rating", skip(self))]
  async fn recompute_rating(&self, product_id: i64) -> StorefrontResult<Option<f64>> {
    // Single statement, so a concurrent review write cannot interleave
    // between reading the grades and storing the mean.
    sqlx::query_scalar::<_, f64>(
      "UPDATE products SET rating = COALESCE(( \
         SELECT ROUND(AVG(grade)::NUMERIC, 2)::DOUBLE PRECISION \
         FROM reviews WHERE product_id = $1 AND is_active \
       ), 0) \
       WHERE id = $1 RETURNING rating",
    )
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(storage)
  }

  async fn list_active_reviews(&self) -> StorefrontResult<Vec<Review>> {
    let sql = format!("SELECT {} FROM reviews WHERE is_active ORDER BY id", REVIEW_COLUMNS);
    let rows: Vec<ReviewRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await.map_err(storage)?;
    Ok(rows.into_iter().map(Review::from).collect())
  }

  async fn list_active_reviews_for_product(&self, product_id: i64) -> StorefrontResult<Vec<Review>> {
    let sql = format!(
      "SELECT {} FROM reviews WHERE is_active AND product_id = $1 ORDER BY id",
      REVIEW_COLUMNS
    );
    let rows: Vec<ReviewRow> = sqlx::query_as(&sql)
      .bind(product_id)
      .fetch_all(&self.pool)
      .await
      .map_err(storage)?;
    Ok(rows.into_iter().map(Review::from).collect())
  }

  async fn find_review(&self, id: i64) -> StorefrontResult<Option<Review>> {
    let sql = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
    let row: Option<ReviewRow> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.map(Review::from))
  }

  async fn insert_review(&self, user_id: i64, draft: &ReviewDraft) -> StorefrontResult<Review> {
    let sql = format!(
      "INSERT INTO reviews (user_id, product_id, comment, grade) VALUES ($1, $2, $3, $4) RETURNING {}",
      REVIEW_COLUMNS
    );
    let row: ReviewRow = sqlx::query_as(&sql)
      .bind(user_id)
      .bind(draft.product_id)
      .bind(&draft.comment)
      .bind(draft.grade)
      .fetch_one(&self.pool)
      .await
      .map_err(storage)?;
    Ok(row.into())
  }

  async fn set_review_active(&self, id: i64, active: bool) -> StorefrontResult<bool> {
    self.flip("reviews", id, active).await
  }
}
