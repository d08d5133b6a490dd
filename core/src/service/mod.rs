// storefront_core/src/service/mod.rs

pub mod accounts;
pub mod catalog;
pub mod rating;
pub mod reviews;

pub use accounts::{AccessToken, AccountService};
pub use catalog::CatalogService;
pub use rating::RatingAggregator;
pub use reviews::ReviewService;
