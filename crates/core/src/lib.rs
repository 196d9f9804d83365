//! Shop Catalog Core - Shared types library.
//!
//! This crate provides common types used across all catalog components:
//! - `catalog` - Product catalog HTTP service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding is available behind the `postgres`
//! feature so the types can be bound directly in sqlx queries.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and the category policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
