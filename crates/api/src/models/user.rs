//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bistro_core::{Email, UserId, UserRole};

/// A registered user.
///
/// `role` is absent for regular users; only admins carry a role value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique across the collection).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Elevated role, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin)
    }
}

/// Input for registering a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: Email,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<UserRole>) -> User {
        User {
            id: UserId::new(),
            email: Email::parse("diner@example.com").expect("valid email"),
            name: "Diner".to_owned(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(user(Some(UserRole::Admin)).is_admin());
        assert!(!user(None).is_admin());
    }
}
