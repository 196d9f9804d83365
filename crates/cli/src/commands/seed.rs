//! Seed reference data (categories, roles) from YAML files.
//!
//! # File format
//!
//! ```yaml
//! # categories.yaml
//! - name: Tools
//!   description: Hand and power tools
//! - name: Garden
//!
//! # roles.yaml
//! - name: admin
//! - name: customer
//! ```
//!
//! Categories are upserted by name, so reseeding refreshes descriptions.
//! Roles that already exist are skipped.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use shop_catalog::db::{CategoryRepository, RepositoryError, RoleRepository};
use shop_catalog::models::{NewCategory, NewRole};

/// Seed categories from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or validated, or if a
/// database operation fails.
pub async fn categories(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let categories: Vec<NewCategory> = load(file_path).await?;
    let categories = trim_category_names(categories);
    check(&validate_names(categories.iter().map(|c| c.name.as_str())))?;
    info!(count = categories.len(), "Parsed categories");

    let pool = super::connect().await?;
    let repo = CategoryRepository::new(&pool);

    for input in &categories {
        let category = repo.upsert_by_name(input).await?;
        info!(id = %category.id, name = %category.name, "Seeded category");
    }

    info!(count = categories.len(), "Category seeding complete");
    Ok(())
}

/// Seed roles from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or validated, or if a
/// database operation fails.
pub async fn roles(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let roles: Vec<NewRole> = load(file_path).await?;
    let roles = trim_role_names(roles);
    check(&validate_names(roles.iter().map(|r| r.name.as_str())))?;
    info!(count = roles.len(), "Parsed roles");

    let pool = super::connect().await?;
    let repo = RoleRepository::new(&pool);

    let mut created = 0_usize;
    for input in &roles {
        match repo.create(input).await {
            Ok(role) => {
                created += 1;
                info!(id = %role.id, name = %role.name, "Seeded role");
            }
            Err(RepositoryError::Conflict(_)) => {
                warn!(name = %input.name, "Role already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(created, skipped = roles.len() - created, "Role seeding complete");
    Ok(())
}

/// Read and parse a YAML seed file.
async fn load<T: DeserializeOwned>(file_path: &str) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse(&content)?)
}

fn parse<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, serde_yaml::Error> {
    // An empty file is an empty list.
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(content)
}

/// Strip surrounding whitespace so the stored name matches the validated one.
fn trim_category_names(categories: Vec<NewCategory>) -> Vec<NewCategory> {
    categories
        .into_iter()
        .map(|c| NewCategory {
            name: c.name.trim().to_owned(),
            ..c
        })
        .collect()
}

fn trim_role_names(roles: Vec<NewRole>) -> Vec<NewRole> {
    roles
        .into_iter()
        .map(|r| NewRole {
            name: r.name.trim().to_owned(),
        })
        .collect()
}

/// Collect problems with a list of names: blanks and duplicates.
fn validate_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for (index, name) in names.into_iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            errors.push(format!("entry {index}: name is empty"));
        } else if !seen.insert(trimmed) {
            errors.push(format!("entry {index}: duplicate name '{trimmed}'"));
        }
    }

    errors
}

fn check(errors: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    if errors.is_empty() {
        return Ok(());
    }

    error!("Seed file validation failed:");
    for err in errors {
        error!("  - {err}");
    }
    Err(format!("{} validation errors found", errors.len()).into())
}
