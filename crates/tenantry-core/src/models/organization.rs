//! Organization domain model.
//!
//! Organizations scope almost every other resource: buckets, dashboards,
//! tasks and the permissions that grant access to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant-scoping entity. Ownership is not a field: it is expressed by a
/// [`UserResourceMapping`](super::urm::UserResourceMapping) with
/// [`UserType::Owner`](super::urm::UserType::Owner).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: Uuid,
    /// Unique within the installation.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub description: Option<String>,
}
