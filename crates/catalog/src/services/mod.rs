//! Business logic services for the catalog.
//!
//! # Services
//!
//! - `catalog` - Product CRUD and shaping of listing records

pub mod catalog;

pub use catalog::{CatalogError, ProductCatalogService};
