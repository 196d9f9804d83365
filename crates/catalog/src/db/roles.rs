//! Role repository, including the role → users back-reference.

use sqlx::PgPool;

use shop_catalog_core::{RoleId, UserId};

use super::RepositoryError;
use crate::models::{NewRole, Role, User};

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: RoleId,
    name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    last_name: String,
    email: String,
    password: String,
    roleid: Option<RoleId>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            last_name: row.last_name,
            email: row.email,
            password: row.password,
            role_id: row.roleid,
        }
    }
}

/// Repository for role database operations.
pub struct RoleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RoleRepository<'a> {
    /// Create a new role repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all roles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Role>, RepositoryError> {
        let rows = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM role ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a role with that name exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewRole) -> Result<Role, RepositoryError> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO role (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&input.name)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(row.into())
    }

    /// Users assigned to `role_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn users_with_role(&self, role_id: RoleId) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, last_name, email, password, roleid
            FROM "user"
            WHERE roleid = $1
            ORDER BY id
            "#,
        )
        .bind(role_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
