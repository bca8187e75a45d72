//! Error types for the Tenantry system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenantryError {
    /// The installation already has an active user; onboarding can only
    /// happen once.
    #[error("onboarding has already been completed")]
    OnboardingDisabled,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} name already exists: {name}")]
    NameConflict { entity: String, name: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// A key written with create-only semantics already existed at commit
    /// time: another writer got there first.
    #[error("Write conflict: {0}")]
    WriteConflict(String),

    /// Storage, transaction, commit and record-encoding failures.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TenantryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn name_conflict(entity: &str, name: impl Into<String>) -> Self {
        Self::NameConflict {
            entity: entity.into(),
            name: name.into(),
        }
    }

    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<serde_json::Error> for TenantryError {
    fn from(err: serde_json::Error) -> Self {
        TenantryError::Store(format!("record encoding: {err}"))
    }
}

pub type TenantryResult<T> = Result<T, TenantryError>;
