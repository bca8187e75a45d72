//! User domain model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// Unique within the installation.
    pub name: String,
    pub status: UserStatus,
    /// Argon2id PHC string, if the user has a password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// The user as handed back to callers: the password hash stays in the
    /// store.
    pub fn without_password(self) -> Self {
        Self {
            password_hash: None,
            ..self
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("status", &self.status)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub status: UserStatus,
    /// Pre-computed password hash. Plaintext passwords never reach the
    /// store.
    pub password_hash: Option<String>,
}

impl CreateUser {
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: UserStatus::Active,
            password_hash: None,
        }
    }
}

/// Filter for user listings. Empty filter matches every user.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub status: Option<UserStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "admin".into(),
            status: UserStatus::Active,
            password_hash: Some("$argon2id$v=19$secret".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn debug_output_hides_the_hash() {
        let rendered = format!("{:?}", user_with_password());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("argon2id"));
    }

    #[test]
    fn without_password_drops_the_hash_from_json() {
        let user = user_with_password().without_password();
        assert!(user.password_hash.is_none());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
    }
}
