// storefront_core/src/model/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StorefrontError, StorefrontResult};

pub const MIN_GRADE: i32 = 1;
pub const MAX_GRADE: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
  pub id: i64,
  pub user_id: i64,
  pub product_id: i64,
  pub comment: Option<String>,
  pub comment_date: DateTime<Utc>,
  pub grade: i32,
  pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDraft {
  pub product_id: i64,
  #[serde(default)]
  pub comment: Option<String>,
  pub grade: i32,
}

impl ReviewDraft {
  /// Same 1..=5 range the `reviews.grade` CHECK constraint enforces.
  pub fn validate(&self) -> StorefrontResult<()> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&self.grade) {
      return Err(StorefrontError::validation(format!(
        "Grade must be between {} and {}",
        MIN_GRADE, MAX_GRADE
      )));
    }
    if let Some(comment) = &self.comment {
      if comment.chars().count() > 200 {
        return Err(StorefrontError::validation("Comment must be at most 200 characters"));
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn grade_range_is_one_to_five() {
    let mk = |grade| ReviewDraft {
      product_id: 1,
      comment: None,
      grade,
    };
    assert!(mk(0).validate().is_err());
    assert!(mk(1).validate().is_ok());
    assert!(mk(5).validate().is_ok());
    assert!(mk(6).validate().is_err());
  }

  #[test]
  fn long_comment_is_rejected() {
    let d = ReviewDraft {
      product_id: 1,
      comment: Some("y".repeat(201)),
      grade: 3,
    };
    assert!(d.validate().is_err());
  }
}
