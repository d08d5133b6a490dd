// src/lib.rs

//! Storefront: the domain core of a small e-commerce catalog.
//!
//! Provides:
//!  - Categories and products with soft deletion and parent/child categories.
//!  - Reviews whose active grades drive each product's derived rating.
//!  - Accounts with a closed role set (buyer, seller, admin), argon2 password
//!    hashes and HS256 access/refresh tokens.
//!  - An authorization gate that turns a bearer token into a user and checks
//!    roles and product ownership.
//!
//! Persistence sits behind the object-safe [`Store`] trait. [`MemoryStore`]
//! ships here; the server crate provides the PostgreSQL implementation.

pub mod credentials;
pub mod error;
pub mod gate;
pub mod model;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::credentials::{Claims, CredentialService, TokenPair};
pub use crate::error::{StorefrontError, StorefrontResult};
pub use crate::gate::{AuthorizationGate, GateStage, RoleRequirement, ADMIN_ONLY, BUYER_ONLY, SELLER_ONLY};
pub use crate::model::{
  Category, CategoryDraft, Product, ProductDraft, Review, ReviewDraft, Role, User, UserDraft,
};
pub use crate::service::{AccessToken, AccountService, CatalogService, RatingAggregator, ReviewService};
pub use crate::store::{MemoryStore, Store};

use std::sync::Arc;

/// Every service wired over one shared store and one credential service.
///
/// Built once at process start and shared by reference (it is cheap to clone).
#[derive(Clone)]
pub struct Storefront {
  pub gate: AuthorizationGate,
  pub accounts: AccountService,
  pub catalog: CatalogService,
  pub reviews: ReviewService,
  pub rating: RatingAggregator,
  store: Arc<dyn Store>,
}

impl Storefront {
  pub fn new(store: Arc<dyn Store>, credentials: CredentialService) -> Self {
    let credentials = Arc::new(credentials);
    let gate = AuthorizationGate::new(credentials.clone(), store.clone());
    let catalog = CatalogService::new(store.clone());
    let rating = RatingAggregator::new(store.clone());
    Self {
      accounts: AccountService::new(store.clone(), credentials, gate.clone()),
      reviews: ReviewService::new(store.clone(), catalog.clone(), rating.clone()),
      gate,
      catalog,
      rating,
      store,
    }
  }

  /// Direct access to the underlying rows, bypassing the active-only filters.
  pub fn store(&self) -> &Arc<dyn Store> {
    &self.store
  }
}
