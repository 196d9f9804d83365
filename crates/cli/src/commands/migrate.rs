//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! catalog-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! Migration files live in `crates/catalog/migrations/` and are embedded
//! into the binary at compile time.

use shop_catalog::db;

/// Apply all pending catalog migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running catalog migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
