//! Entity store and issuer trait definitions.
//!
//! Every operation runs inside a caller-supplied [`Transaction`], so a
//! sequence of calls across different stores commits or rolls back as
//! one unit. Implementations report `NotFound`, `NameConflict` and
//! `Validation` errors distinctly.

use uuid::Uuid;

use crate::error::TenantryResult;
use crate::kv::Transaction;
use crate::models::{
    authorization::{Authorization, CreateAuthorization},
    bucket::{Bucket, CreateBucket},
    organization::{CreateOrganization, Organization},
    urm::{CreateUserResourceMapping, UserResourceMapping, UserResourceMappingFilter},
    user::{CreateUser, User, UserFilter},
};

// ---------------------------------------------------------------------------
// Users & organizations (installation scope)
// ---------------------------------------------------------------------------

pub trait UserStore: Send + Sync {
    fn create<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateUser,
    ) -> impl Future<Output = TenantryResult<User>> + Send;
    fn get_by_id<X: Transaction>(
        &self,
        tx: &mut X,
        id: Uuid,
    ) -> impl Future<Output = TenantryResult<User>> + Send;
    fn get_by_name<X: Transaction>(
        &self,
        tx: &mut X,
        name: &str,
    ) -> impl Future<Output = TenantryResult<User>> + Send;
    fn delete<X: Transaction>(
        &self,
        tx: &mut X,
        id: Uuid,
    ) -> impl Future<Output = TenantryResult<()>> + Send;
    fn list<X: Transaction>(
        &self,
        tx: &mut X,
        filter: UserFilter,
    ) -> impl Future<Output = TenantryResult<Vec<User>>> + Send;
}

pub trait OrganizationStore: Send + Sync {
    fn create<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateOrganization,
    ) -> impl Future<Output = TenantryResult<Organization>> + Send;
    fn get_by_id<X: Transaction>(
        &self,
        tx: &mut X,
        id: Uuid,
    ) -> impl Future<Output = TenantryResult<Organization>> + Send;
    fn get_by_name<X: Transaction>(
        &self,
        tx: &mut X,
        name: &str,
    ) -> impl Future<Output = TenantryResult<Organization>> + Send;
    fn delete<X: Transaction>(
        &self,
        tx: &mut X,
        id: Uuid,
    ) -> impl Future<Output = TenantryResult<()>> + Send;
    fn list<X: Transaction>(
        &self,
        tx: &mut X,
    ) -> impl Future<Output = TenantryResult<Vec<Organization>>> + Send;
}

// ---------------------------------------------------------------------------
// Organization-scoped
// ---------------------------------------------------------------------------

pub trait BucketStore: Send + Sync {
    fn create<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateBucket,
    ) -> impl Future<Output = TenantryResult<Bucket>> + Send;
    fn get_by_id<X: Transaction>(
        &self,
        tx: &mut X,
        id: Uuid,
    ) -> impl Future<Output = TenantryResult<Bucket>> + Send;
    fn get_by_name<X: Transaction>(
        &self,
        tx: &mut X,
        org_id: Uuid,
        name: &str,
    ) -> impl Future<Output = TenantryResult<Bucket>> + Send;
    fn delete<X: Transaction>(
        &self,
        tx: &mut X,
        id: Uuid,
    ) -> impl Future<Output = TenantryResult<()>> + Send;
    /// All buckets owned by an organization, ordered by name.
    fn list_by_org<X: Transaction>(
        &self,
        tx: &mut X,
        org_id: Uuid,
    ) -> impl Future<Output = TenantryResult<Vec<Bucket>>> + Send;
}

pub trait UserResourceMappingStore: Send + Sync {
    /// Fails with `NameConflict` if the user is already mapped to the
    /// resource.
    fn create<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateUserResourceMapping,
    ) -> impl Future<Output = TenantryResult<UserResourceMapping>> + Send;
    fn find<X: Transaction>(
        &self,
        tx: &mut X,
        filter: UserResourceMappingFilter,
    ) -> impl Future<Output = TenantryResult<Vec<UserResourceMapping>>> + Send;
    fn delete<X: Transaction>(
        &self,
        tx: &mut X,
        resource_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = TenantryResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

pub trait AuthorizationIssuer: Send + Sync {
    /// Persist a new authorization and return it with its id and raw
    /// token filled in.
    fn create_authorization<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateAuthorization,
    ) -> impl Future<Output = TenantryResult<Authorization>> + Send;
}
