//! User and role domain types.
//!
//! Part of the relational schema but not served by any endpoint. Users of a
//! role are looked up with `RoleRepository::users_with_role`.

use serde::{Deserialize, Serialize};

use shop_catalog_core::{RoleId, UserId};

/// A named role users can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// Input for creating a role.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRole {
    pub name: String,
}

/// A back-office user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// First name.
    pub name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Stored password hash. Never serialized.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Assigned role, if any.
    pub role_id: Option<RoleId>,
}
