//! Domain models for Tenantry.
//!
//! Records refer to each other by identifier only; each one is persisted
//! by its own store.

pub mod authorization;
pub mod bucket;
pub mod onboarding;
pub mod organization;
pub mod permission;
pub mod urm;
pub mod user;
