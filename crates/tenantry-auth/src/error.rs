//! Credential error types.

use tenantry_core::error::TenantryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TenantryError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::WeakPassword { .. } | AuthError::TokenInvalid(_) => {
                TenantryError::Validation {
                    message: err.to_string(),
                }
            }
            AuthError::Crypto(msg) => TenantryError::Crypto(msg),
        }
    }
}
