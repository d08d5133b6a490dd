// storefront_core/src/model/mod.rs

//! Catalog entities and the client-supplied drafts used to create or edit them.

pub mod category;
pub mod product;
pub mod review;
pub mod role;
pub mod user;

pub use category::{Category, CategoryDraft};
pub use product::{Product, ProductDraft};
pub use review::{Review, ReviewDraft};
pub use role::Role;
pub use user::{NewUser, User, UserDraft};
