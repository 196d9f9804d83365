//! Domain models for the catalog.
//!
//! These types represent domain objects separate from database row types.
//! Relationships are held as IDs or resolved values, never as
//! back-reference collections: "products of a category" and "users of a
//! role" are queries on the repositories.

pub mod category;
pub mod product;
pub mod user;

pub use category::{Category, NewCategory};
pub use product::{Product, ProductDraft, ProductResponse};
pub use user::{NewRole, Role, User};
