// storefront_core/src/service/rating.rs

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{StorefrontError, StorefrontResult};
use crate::store::Store;

/// Rating written when a product has no active reviews.
pub const EMPTY_RATING: f64 = 0.0;

/// Owns `Product::rating`. Called inline after every review create or
/// deactivate, never deferred.
#[derive(Clone)]
pub struct RatingAggregator {
  store: Arc<dyn Store>,
}

impl RatingAggregator {
  pub fn new(store: Arc<dyn Store>) -> Self {
    Self { store }
  }

  /// Recomputes and stores the product's rating, returning the value written.
  #[instrument(name = "rating::recompute", skip(self), err(Display))]
  pub async fn recompute(&self, product_id: i64) -> StorefrontResult<f64> {
    let rating = self
      .store
      .recompute_rating(product_id)
      .await?
      .ok_or_else(|| StorefrontError::not_found("Product not found"))?;
    info!(product_id, rating, "Product rating recomputed.");
    Ok(rating)
  }
}

/// Two decimal places, matching the `NUMERIC(10, 2)` precision the rating
/// column historically had.
pub fn round_rating(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rounds_to_two_places() {
    assert_eq!(round_rating(4.0), 4.0);
    assert_eq!(round_rating(11.0 / 3.0), 3.67);
    assert_eq!(round_rating(10.0 / 3.0), 3.33);
  }
}
