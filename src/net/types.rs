//! Wire DTOs for the user-management REST boundary.
//!
//! DESIGN
//! ======
//! These types mirror backend payloads so serde round-trips stay lossless.
//! Role strings outside the closed enumeration collapse to `viewer` rather
//! than failing deserialization, and absent record fields default to empty
//! strings so loosely shaped responses never leak `undefined`-style holes
//! into persisted state.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::session::store::SafeUser;

/// Access role attached to every user account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Editor,
    #[default]
    #[serde(other)]
    Viewer,
}

impl Role {
    /// All roles in privilege order, for select inputs.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Editor, Role::Viewer];

    /// Wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    /// Parse an external role string; anything unrecognized is `Viewer`.
    pub fn parse(value: &str) -> Role {
        match value {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "editor" => Role::Editor,
            _ => Role::Viewer,
        }
    }
}

/// A user record as returned by the backend.
///
/// Some endpoints key the identifier as `_id`, others as `id`; both are kept
/// so [`UserRecord::primary_id`] can apply the documented precedence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl UserRecord {
    /// Identifier under the documented precedence: `_id`, then `id`.
    /// Empty strings count as absent.
    pub fn primary_id(&self) -> Option<&str> {
        self.mongo_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.is_empty()))
    }

    /// Project into the persistable safe shape. Credentials and timestamps
    /// are dropped; only identity, contact, and role survive.
    pub fn to_safe(&self) -> SafeUser {
        SafeUser {
            id: self.primary_id().map(str::to_owned),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Body of a successful `POST /api/users/login`.
///
/// `token` and `user` stay optional so the adapter can reject each absence
/// with a distinct message before anything touches the session store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
}
