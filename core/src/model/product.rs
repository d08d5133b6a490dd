// storefront_core/src/model/product.rs

use serde::{Deserialize, Serialize};

use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  pub price: f64,
  pub image_url: Option<String>,
  pub stock: i32,
  /// Owned by the rating aggregator; 0.0 until the product has an active review.
  pub rating: f64,
  pub is_active: bool,
  pub category_id: i64,
  pub seller_id: i64,
}

/// Client-editable product fields. Rating and seller are deliberately absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub price: f64,
  #[serde(default)]
  pub image_url: Option<String>,
  pub stock: i32,
  pub category_id: i64,
}

impl ProductDraft {
  pub fn validate(&self) -> StorefrontResult<()> {
    let name_len = self.name.chars().count();
    if !(3..=100).contains(&name_len) {
      return Err(StorefrontError::validation(
        "Product name must be between 3 and 100 characters",
      ));
    }
    if let Some(description) = &self.description {
      if description.chars().count() > 500 {
        return Err(StorefrontError::validation(
          "Product description must be at most 500 characters",
        ));
      }
    }
    if let Some(url) = &self.image_url {
      if url.chars().count() > 200 {
        return Err(StorefrontError::validation(
          "Product image URL must be at most 200 characters",
        ));
      }
    }
    if !self.price.is_finite() || self.price <= 0.0 {
      return Err(StorefrontError::validation("Product price must be greater than 0"));
    }
    if self.stock <= 0 {
      return Err(StorefrontError::validation("Product stock must be greater than 0"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> ProductDraft {
    ProductDraft {
      name: "Kettle".into(),
      description: Some("Stainless steel".into()),
      price: 19.99,
      image_url: None,
      stock: 4,
      category_id: 1,
    }
  }

  #[test]
  fn well_formed_draft_passes() {
    assert!(draft().validate().is_ok());
  }

  #[test]
  fn price_must_be_strictly_positive() {
    for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
      let mut d = draft();
      d.price = price;
      assert!(d.validate().is_err(), "price {price} should be rejected");
    }
  }

  #[test]
  fn stock_must_be_strictly_positive() {
    let mut d = draft();
    d.stock = 0;
    assert!(d.validate().is_err());
    d.stock = -3;
    assert!(d.validate().is_err());
  }

  #[test]
  fn text_fields_are_bounded() {
    let mut d = draft();
    d.name = "ab".into();
    assert!(d.validate().is_err());

    let mut d = draft();
    d.description = Some("x".repeat(501));
    assert!(d.validate().is_err());

    let mut d = draft();
    d.image_url = Some("x".repeat(201));
    assert!(d.validate().is_err());
  }
}
