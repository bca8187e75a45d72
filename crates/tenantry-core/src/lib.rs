//! Tenantry Core: domain models, error types and storage traits shared by
//! every other crate.

pub mod error;
pub mod kv;
pub mod models;
pub mod repository;
