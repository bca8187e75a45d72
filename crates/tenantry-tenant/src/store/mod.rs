//! Key-value implementations of the tenant entity stores.

mod bucket;
mod organization;
mod urm;
mod user;

pub use bucket::KvBucketStore;
pub use organization::KvOrganizationStore;
pub use urm::KvUserResourceMappingStore;
pub use user::KvUserStore;
