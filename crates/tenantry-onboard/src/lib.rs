//! Tenantry Onboard: the one-time bootstrap of an installation.
//!
//! [`OnboardingService::onboard_user`] creates the first user, their
//! organization, a default bucket, the ownership mapping and an
//! all-access authorization in a single transaction. It only succeeds
//! while the installation has no active user.

pub mod config;
pub mod permissions;
mod service;

pub use config::OnboardingConfig;
pub use permissions::{ORG_RESOURCE_TYPES, derive_permissions};
pub use service::{ONBOARDINGS, OnboardingService};
