// tests/account_tests.rs
mod common;

use common::*;
use storefront::{Role, Store, StorefrontError, UserDraft};

fn draft(email: &str, role: Role) -> UserDraft {
  UserDraft {
    email: email.to_string(),
    password: PASSWORD.to_string(),
    role,
  }
}

#[tokio::test]
async fn test_register_stores_hash_not_password() {
  let shop = Shop::new();
  let user = shop.user("new@shop.io", Role::Seller).await;
  assert!(user.is_active);
  assert_eq!(user.role, Role::Seller);
  assert_ne!(user.hashed_password, PASSWORD);
  assert!(user.hashed_password.starts_with("$argon2"));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
  let shop = Shop::new();
  shop.user("taken@shop.io", Role::Buyer).await;
  let err = shop
    .storefront
    .accounts
    .register(draft("taken@shop.io", Role::Admin))
    .await
    .unwrap_err();
  assert!(matches!(err, StorefrontError::Conflict(ref m) if m == "Email already registered"));
}

#[tokio::test]
async fn test_register_validates_email_and_password() {
  let shop = Shop::new();
  let accounts = &shop.storefront.accounts;

  let err = accounts.register(draft("not-an-email", Role::Buyer)).await.unwrap_err();
  assert!(matches!(err, StorefrontError::Validation(_)));

  let mut short = draft("short@shop.io", Role::Buyer);
  short.password = "1234567".into();
  let err = accounts.register(short).await.unwrap_err();
  assert!(matches!(err, StorefrontError::Validation(_)));
  assert!(shop.store.find_user_by_email("short@shop.io").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_issues_pair_for_valid_credentials() {
  let shop = Shop::new();
  let user = shop.user("buyer@shop.io", Role::Buyer).await;
  let pair = shop.storefront.accounts.login("buyer@shop.io", PASSWORD).await.unwrap();
  assert_eq!(pair.token_type, "bearer");
  assert_ne!(pair.access_token, pair.refresh_token);

  let via_access = shop.storefront.gate.authenticate(Some(&pair.access_token)).await.unwrap();
  assert_eq!(via_access.id, user.id);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
  let shop = Shop::new();
  let user = shop.user("buyer@shop.io", Role::Buyer).await;
  let accounts = &shop.storefront.accounts;

  let wrong_password = accounts.login("buyer@shop.io", "nope-nope").await.unwrap_err();
  let unknown_email = accounts.login("nobody@shop.io", PASSWORD).await.unwrap_err();
  shop.store.set_user_active(user.id, false).await.unwrap();
  let inactive = accounts.login("buyer@shop.io", PASSWORD).await.unwrap_err();

  for err in [&wrong_password, &unknown_email, &inactive] {
    assert!(matches!(err, StorefrontError::Unauthenticated(_)));
    assert_eq!(err.to_string(), "Incorrect email or password");
  }
}

#[tokio::test]
async fn test_refresh_token_yields_working_access_token() {
  let shop = Shop::new();
  let user = shop.user("buyer@shop.io", Role::Buyer).await;
  let pair = shop.storefront.accounts.login("buyer@shop.io", PASSWORD).await.unwrap();

  let fresh = shop.storefront.accounts.refresh(&pair.refresh_token).await.unwrap();
  assert_eq!(fresh.token_type, "bearer");
  let resolved = shop.storefront.gate.authenticate(Some(&fresh.access_token)).await.unwrap();
  assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_refresh_rejects_garbage_and_suspended_accounts() {
  let shop = Shop::new();
  let user = shop.user("buyer@shop.io", Role::Buyer).await;
  let pair = shop.storefront.accounts.login("buyer@shop.io", PASSWORD).await.unwrap();

  let err = shop.storefront.accounts.refresh("garbage").await.unwrap_err();
  assert!(matches!(err, StorefrontError::Unauthenticated(_)));

  shop.store.set_user_active(user.id, false).await.unwrap();
  let err = shop.storefront.accounts.refresh(&pair.refresh_token).await.unwrap_err();
  assert!(matches!(err, StorefrontError::Unauthenticated(_)));
}

#[tokio::test]
async fn test_full_review_scenario() {
  let shop = Shop::new();
  let seller = shop.user("seller@shop.io", Role::Seller).await;
  shop.user("buyer@shop.io", Role::Buyer).await;
  shop.user("critic@shop.io", Role::Buyer).await;
  shop.user("admin@shop.io", Role::Admin).await;
  let cat = shop.category("Coffee", None).await;
  let grinder = shop.product(&seller, cat.id).await;

  // Each actor goes through login and the gate, like a request would.
  let gate = &shop.storefront.gate;
  let buyer = gate
    .authenticate(Some(&shop.token_for("buyer@shop.io").await))
    .await
    .unwrap();
  let critic = gate
    .authenticate(Some(&shop.token_for("critic@shop.io").await))
    .await
    .unwrap();
  let admin = gate
    .authenticate(Some(&shop.token_for("admin@shop.io").await))
    .await
    .unwrap();

  let reviews = &shop.storefront.reviews;
  let glowing = reviews
    .create_review(
      &buyer,
      storefront::ReviewDraft {
        product_id: grinder.id,
        comment: Some("Perfect grind".into()),
        grade: 5,
      },
    )
    .await
    .unwrap();
  assert_eq!(shop.storefront.catalog.get_product(grinder.id).await.unwrap().rating, 5.0);

  reviews
    .create_review(
      &critic,
      storefront::ReviewDraft {
        product_id: grinder.id,
        comment: None,
        grade: 3,
      },
    )
    .await
    .unwrap();
  assert_eq!(shop.storefront.catalog.get_product(grinder.id).await.unwrap().rating, 4.0);

  reviews.deactivate_review(&admin, glowing.id).await.unwrap();
  assert_eq!(shop.storefront.catalog.get_product(grinder.id).await.unwrap().rating, 3.0);
  assert_eq!(reviews.product_reviews(grinder.id).await.unwrap().len(), 1);
}
