//! Core types for the shop catalog.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod policy;
pub mod price;

pub use id::*;
pub use policy::{CategoryPolicy, CategoryPolicyError};
pub use price::{PRICE_SCALE, Price};
