// tests/common/mod.rs
#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::sync::Arc;

use storefront::{Category, CategoryDraft, CredentialService, MemoryStore, Role, User, UserDraft};
use storefront_server::AppState;

pub const SECRET: &[u8] = b"api-test-secret";
pub const PASSWORD: &str = "password123";

static TRACING: Lazy<()> = Lazy::new(|| {
  let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

/// Application state over a fresh in-memory store.
pub struct Fixture {
  pub state: AppState,
  pub store: Arc<MemoryStore>,
}

impl Fixture {
  pub fn new() -> Self {
    setup_tracing();
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), CredentialService::with_default_ttls(SECRET));
    Self { state, store }
  }

  pub async fn user(&self, email: &str, role: Role) -> User {
    self
      .state
      .storefront
      .accounts
      .register(UserDraft {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        role,
      })
      .await
      .unwrap()
  }

  /// Registers `email` with `role` and returns a bearer header value for it.
  pub async fn bearer(&self, email: &str, role: Role) -> String {
    self.user(email, role).await;
    let pair = self.state.storefront.accounts.login(email, PASSWORD).await.unwrap();
    format!("Bearer {}", pair.access_token)
  }

  pub async fn category(&self, name: &str) -> Category {
    self
      .state
      .storefront
      .catalog
      .create_category(CategoryDraft {
        name: name.to_string(),
        parent_id: None,
      })
      .await
      .unwrap()
  }
}
