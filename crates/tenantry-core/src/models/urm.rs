//! User-resource mapping: "user X holds role R on resource Y".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::permission::ResourceType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserType {
    Owner,
    Member,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResourceMapping {
    pub user_id: Uuid,
    pub resource_id: Uuid,
    pub resource_type: ResourceType,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResourceMapping {
    pub user_id: Uuid,
    pub resource_id: Uuid,
    pub resource_type: ResourceType,
    pub user_type: UserType,
}

/// Every populated field must match. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct UserResourceMappingFilter {
    pub resource_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub resource_type: Option<ResourceType>,
    pub user_type: Option<UserType>,
}

impl UserResourceMappingFilter {
    pub fn matches(&self, urm: &UserResourceMapping) -> bool {
        self.resource_id.is_none_or(|id| id == urm.resource_id)
            && self.user_id.is_none_or(|id| id == urm.user_id)
            && self.resource_type.is_none_or(|t| t == urm.resource_type)
            && self.user_type.is_none_or(|t| t == urm.user_type)
    }
}
