// storefront_server/src/state.rs
use std::sync::Arc;

use storefront::{CredentialService, Store, Storefront};

/// Shared with every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
  pub storefront: Storefront,
}

impl AppState {
  pub fn new(store: Arc<dyn Store>, credentials: CredentialService) -> Self {
    Self {
      storefront: Storefront::new(store, credentials),
    }
  }
}
