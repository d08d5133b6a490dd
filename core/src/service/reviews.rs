// storefront_core/src/service/reviews.rs

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::catalog::CatalogService;
use super::rating::RatingAggregator;
use crate::error::{StorefrontError, StorefrontResult};
use crate::gate::{require_role, ADMIN_ONLY, BUYER_ONLY};
use crate::model::{Review, ReviewDraft, User};
use crate::store::Store;

#[derive(Clone)]
pub struct ReviewService {
  store: Arc<dyn Store>,
  catalog: CatalogService,
  rating: RatingAggregator,
}

impl ReviewService {
  pub fn new(store: Arc<dyn Store>, catalog: CatalogService, rating: RatingAggregator) -> Self {
    Self { store, catalog, rating }
  }

  pub async fn list_reviews(&self) -> StorefrontResult<Vec<Review>> {
    self.store.list_active_reviews().await
  }

  pub async fn product_reviews(&self, product_id: i64) -> StorefrontResult<Vec<Review>> {
    self.catalog.active_product(product_id).await?;
    self.store.list_active_reviews_for_product(product_id).await
  }

  /// Persists the review, then recomputes the product's rating before returning.
  ///
  /// If the recompute fails the review stays persisted and the error is
  /// returned; the rating catches up on the next review mutation.
  #[instrument(
    name = "reviews::create",
    skip(self, actor, draft),
    fields(user_id = actor.id, product_id = draft.product_id, grade = draft.grade)
  )]
  pub async fn create_review(&self, actor: &User, draft: ReviewDraft) -> StorefrontResult<Review> {
    require_role(actor, BUYER_ONLY)?;
    draft.validate()?;
    self.catalog.active_product(draft.product_id).await?;

    let review = self.store.insert_review(actor.id, &draft).await?;
    info!(review_id = review.id, "Review created.");

    self.rating.recompute(review.product_id).await?;
    Ok(review)
  }

  /// Soft-deletes an active review and recomputes the product's rating.
  #[instrument(name = "reviews::deactivate", skip(self, actor), fields(admin_id = actor.id))]
  pub async fn deactivate_review(&self, actor: &User, id: i64) -> StorefrontResult<Review> {
    require_role(actor, ADMIN_ONLY)?;
    let mut review = match self.store.find_review(id).await? {
      Some(review) if review.is_active => review,
      _ => {
        warn!(review_id = id, "Review not found or already inactive.");
        return Err(StorefrontError::not_found("Review not found"));
      }
    };

    if !self.store.set_review_active(id, false).await? {
      return Err(StorefrontError::not_found("Review not found"));
    }
    review.is_active = false;
    info!(review_id = id, product_id = review.product_id, "Review marked as inactive.");

    self.rating.recompute(review.product_id).await?;
    Ok(review)
  }
}
