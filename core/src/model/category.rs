// storefront_core/src/model/category.rs

use serde::{Deserialize, Serialize};

use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
  pub id: i64,
  pub name: String,
  pub parent_id: Option<i64>,
  pub is_active: bool,
}

/// Body of category create and update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
  pub name: String,
  #[serde(default)]
  pub parent_id: Option<i64>,
}

impl CategoryDraft {
  pub fn validate(&self) -> StorefrontResult<()> {
    let len = self.name.chars().count();
    if !(3..=50).contains(&len) {
      return Err(StorefrontError::validation(
        "Category name must be between 3 and 50 characters",
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn name_length_bounds() {
    let mk = |name: &str| CategoryDraft {
      name: name.to_string(),
      parent_id: None,
    };
    assert!(mk("ab").validate().is_err());
    assert!(mk("abc").validate().is_ok());
    assert!(mk(&"x".repeat(50)).validate().is_ok());
    assert!(mk(&"x".repeat(51)).validate().is_err());
  }
}
