//! Tenantry Tenant: key-value implementations of the user, organization,
//! bucket and user-resource-mapping stores, and [`TenantService`] for
//! callers that want one transaction per operation.

pub mod keys;
mod service;
pub mod store;
mod validate;

pub use service::TenantService;
pub use store::{
    KvBucketStore, KvOrganizationStore, KvUserResourceMappingStore, KvUserStore,
};
pub use validate::validate_name;
