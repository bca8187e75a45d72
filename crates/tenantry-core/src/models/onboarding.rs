//! Onboarding request and result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::authorization::Authorization;
use super::bucket::Bucket;
use super::organization::Organization;
use super::user::User;

/// Names (and optional extras) for the entities created on first setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingRequest {
    pub user: String,
    pub org: String,
    pub bucket: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Retention for the default bucket; `None` uses the configured
    /// default.
    #[serde(default)]
    pub retention_period_secs: Option<u64>,
    /// Raw token to use for the bootstrap authorization instead of a
    /// generated one.
    #[serde(default)]
    pub token: Option<String>,
}

impl OnboardingRequest {
    pub fn new(user: impl Into<String>, org: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            org: org.into(),
            bucket: bucket.into(),
            password: None,
            retention_period_secs: None,
            token: None,
        }
    }
}

/// Everything created by a successful onboarding.
#[derive(Debug, Clone)]
pub struct OnboardingResult {
    pub user: User,
    pub org: Organization,
    pub bucket: Bucket,
    pub auth: Authorization,
}

/// Ledger entry written by every completed onboarding.
///
/// Entries are numbered; the next onboarding claims the next number with
/// a create-only write, so two onboardings racing past the gate cannot
/// both commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingRecord {
    pub user_id: Uuid,
    pub org_id: Uuid,
    pub completed_at: DateTime<Utc>,
}
