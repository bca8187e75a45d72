//! Tenantry Auth: authorization issuance, opaque API tokens and
//! password hashing.

pub mod config;
pub mod error;
pub mod password;
pub mod store;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use store::KvAuthorizationStore;
