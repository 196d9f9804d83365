//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

use shop_catalog::db;

/// Errors shared by the database-backed commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Load `.env` and read the catalog database URL.
///
/// # Errors
///
/// Returns `CommandError::MissingEnvVar` if neither `CATALOG_DATABASE_URL`
/// nor `DATABASE_URL` is set.
pub fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("CATALOG_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("CATALOG_DATABASE_URL"))
}

/// Connect to the catalog database.
///
/// # Errors
///
/// Returns `CommandError` if the URL is missing or the connection fails.
pub async fn connect() -> Result<sqlx::PgPool, CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to catalog database...");
    Ok(db::create_pool(&database_url).await?)
}
