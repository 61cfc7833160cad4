//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user with a freshly generated id.
    ///
    /// Name and email are stored trimmed.
    pub fn new(name: &str, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Update user's name
    pub fn update_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Update user's email
    pub fn update_email(&mut self, email: &str) {
        self.email = email.trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Mark as modified without changing any field
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Soft delete the user
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// Fields accepted when creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update: `None` leaves a field unchanged, `Some` replaces it.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User display name
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// User email address
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_active_with_trimmed_fields() {
        let user = User::new("  Ada ", " ada@x.com");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@x.com");
        assert_eq!(user.created_at, user.updated_at);
        assert!(!user.is_deleted());
    }

    #[test]
    fn soft_delete_sets_timestamp() {
        let mut user = User::new("Ada", "ada@x.com");
        user.soft_delete();
        assert!(user.is_deleted());
        assert_eq!(user.deleted_at, Some(user.updated_at));
    }

    #[test]
    fn response_hides_deletion_marker() {
        let mut user = User::new("Ada", "ada@x.com");
        user.soft_delete();
        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();
        assert!(json.get("deleted_at").is_none());
        assert_eq!(json["name"], "Ada");

        let raw = serde_json::to_value(&user).unwrap();
        assert!(raw.get("deleted_at").is_none());
    }

    #[test]
    fn empty_changes() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            name: Some(String::new()),
            email: None,
        };
        assert!(!changes.is_empty());
    }
}
