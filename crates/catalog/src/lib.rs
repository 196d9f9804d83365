//! Shop Catalog service library.
//!
//! Product catalog over HTTP: handlers in [`routes`], business rules in
//! [`services`], persistence behind the [`db::ProductStore`] trait. The
//! binary in `main.rs` wires these to `PostgreSQL`; tests wire them to
//! [`db::InMemoryProductStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_router;
