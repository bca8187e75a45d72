//! Bucket domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix reserved for buckets the platform creates for itself.
pub const SYSTEM_BUCKET_PREFIX: char = '_';

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BucketType {
    User,
    System,
}

/// A named data container owned by exactly one organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub id: Uuid,
    pub org_id: Uuid,
    /// Unique within the owning organization.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub bucket_type: BucketType,
    /// Data retention in seconds; `0` keeps data forever.
    pub retention_period_secs: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBucket {
    pub org_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub bucket_type: BucketType,
    pub retention_period_secs: u64,
}

impl CreateBucket {
    /// A user bucket with infinite retention.
    pub fn new(org_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            org_id,
            name: name.into(),
            description: None,
            bucket_type: BucketType::User,
            retention_period_secs: 0,
        }
    }
}
