//! Authorization (API credential) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::permission::Permission;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuthorizationStatus {
    Active,
    Inactive,
}

/// A credential bundling a user identity and an ordered permission list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Authorization {
    pub id: Uuid,
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub status: AuthorizationStatus,
    /// Order is significant; consumers compare the list positionally.
    pub permissions: Vec<Permission>,
    /// SHA-256 (hex) of the raw token. The raw token itself is never
    /// persisted.
    pub token_hash: String,
    /// Raw token, present only on the value returned from creation.
    #[serde(skip)]
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuthorization {
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub permissions: Vec<Permission>,
    /// Caller-chosen raw token. Generated when `None`.
    pub token: Option<String>,
}
