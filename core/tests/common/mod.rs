// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Arc;
use tracing::Level;

use storefront::{
  Category, CategoryDraft, CredentialService, MemoryStore, Product, ProductDraft, Role, Store, Storefront, User,
  UserDraft,
};

pub const TEST_SECRET: &[u8] = b"storefront-test-secret";
pub const PASSWORD: &str = "password123";

// --- Fixture ---
pub struct Shop {
  pub storefront: Storefront,
  pub store: Arc<MemoryStore>,
}

impl Shop {
  pub fn new() -> Self {
    setup_tracing();
    let store = Arc::new(MemoryStore::new());
    let storefront = Storefront::new(store.clone(), CredentialService::with_default_ttls(TEST_SECRET));
    Self { storefront, store }
  }

  pub async fn user(&self, email: &str, role: Role) -> User {
    self
      .storefront
      .accounts
      .register(UserDraft {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        role,
      })
      .await
      .expect("register fixture user")
  }

  /// Logs the user in and returns the access token.
  pub async fn token_for(&self, email: &str) -> String {
    self
      .storefront
      .accounts
      .login(email, PASSWORD)
      .await
      .expect("login fixture user")
      .access_token
  }

  pub async fn category(&self, name: &str, parent_id: Option<i64>) -> Category {
    self
      .storefront
      .catalog
      .create_category(CategoryDraft {
        name: name.to_string(),
        parent_id,
      })
      .await
      .expect("create fixture category")
  }

  pub async fn product(&self, seller: &User, category_id: i64) -> Product {
    self
      .storefront
      .catalog
      .create_product(seller, product_draft(category_id))
      .await
      .expect("create fixture product")
  }

  pub async fn stored_rating(&self, product_id: i64) -> f64 {
    self
      .store
      .find_product(product_id)
      .await
      .unwrap()
      .expect("product row exists")
      .rating
  }
}

pub fn product_draft(category_id: i64) -> ProductDraft {
  ProductDraft {
    name: "Cast iron pan".to_string(),
    description: Some("Pre-seasoned, 26cm".to_string()),
    price: 39.5,
    image_url: None,
    stock: 12,
    category_id,
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
