//! Tenant service: one transaction per call over the entity stores.

use tenantry_core::error::TenantryResult;
use tenantry_core::kv::{Store, Transaction};
use tenantry_core::models::bucket::{Bucket, CreateBucket};
use tenantry_core::models::organization::{CreateOrganization, Organization};
use tenantry_core::models::urm::{
    CreateUserResourceMapping, UserResourceMapping, UserResourceMappingFilter,
};
use tenantry_core::models::user::{CreateUser, User, UserFilter};
use tenantry_core::repository::{
    BucketStore, OrganizationStore, UserResourceMappingStore, UserStore,
};
use uuid::Uuid;

use crate::store::{
    KvBucketStore, KvOrganizationStore, KvUserResourceMappingStore, KvUserStore,
};

/// Entity CRUD over a key-value [`Store`].
///
/// Each method runs in its own transaction. Callers that need several
/// operations to commit together use the store accessors ([`Self::users`]
/// etc.) with a transaction of their own.
#[derive(Clone)]
pub struct TenantService<S: Store> {
    store: S,
    users: KvUserStore,
    orgs: KvOrganizationStore,
    buckets: KvBucketStore,
    urms: KvUserResourceMappingStore,
}

impl<S: Store> TenantService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            users: KvUserStore,
            orgs: KvOrganizationStore,
            buckets: KvBucketStore,
            urms: KvUserResourceMappingStore,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn users(&self) -> &KvUserStore {
        &self.users
    }

    pub fn organizations(&self) -> &KvOrganizationStore {
        &self.orgs
    }

    pub fn buckets(&self) -> &KvBucketStore {
        &self.buckets
    }

    pub fn user_resource_mappings(&self) -> &KvUserResourceMappingStore {
        &self.urms
    }

    // -- users ------------------------------------------------------------

    pub async fn create_user(&self, input: CreateUser) -> TenantryResult<User> {
        let mut tx = self.store.begin().await?;
        let user = self.users.create(&mut tx, input).await?;
        tx.commit().await?;
        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: Uuid) -> TenantryResult<User> {
        let mut tx = self.store.begin_read().await?;
        self.users.get_by_id(&mut tx, id).await
    }

    pub async fn find_user_by_name(&self, name: &str) -> TenantryResult<User> {
        let mut tx = self.store.begin_read().await?;
        self.users.get_by_name(&mut tx, name).await
    }

    pub async fn find_users(&self, filter: UserFilter) -> TenantryResult<Vec<User>> {
        let mut tx = self.store.begin_read().await?;
        self.users.list(&mut tx, filter).await
    }

    /// Delete a user together with every resource mapping that names them.
    pub async fn delete_user(&self, id: Uuid) -> TenantryResult<()> {
        let mut tx = self.store.begin().await?;
        let mappings = self
            .urms
            .find(
                &mut tx,
                UserResourceMappingFilter {
                    user_id: Some(id),
                    ..Default::default()
                },
            )
            .await?;
        for urm in mappings {
            self.urms.delete(&mut tx, urm.resource_id, urm.user_id).await?;
        }
        self.users.delete(&mut tx, id).await?;
        tx.commit().await
    }

    // -- organizations ----------------------------------------------------

    pub async fn create_organization(
        &self,
        input: CreateOrganization,
    ) -> TenantryResult<Organization> {
        let mut tx = self.store.begin().await?;
        let org = self.orgs.create(&mut tx, input).await?;
        tx.commit().await?;
        Ok(org)
    }

    pub async fn find_organization_by_id(&self, id: Uuid) -> TenantryResult<Organization> {
        let mut tx = self.store.begin_read().await?;
        self.orgs.get_by_id(&mut tx, id).await
    }

    pub async fn find_organization_by_name(&self, name: &str) -> TenantryResult<Organization> {
        let mut tx = self.store.begin_read().await?;
        self.orgs.get_by_name(&mut tx, name).await
    }

    pub async fn find_organizations(&self) -> TenantryResult<Vec<Organization>> {
        let mut tx = self.store.begin_read().await?;
        self.orgs.list(&mut tx).await
    }

    // -- buckets ----------------------------------------------------------

    pub async fn create_bucket(&self, input: CreateBucket) -> TenantryResult<Bucket> {
        let mut tx = self.store.begin().await?;
        let bucket = self.buckets.create(&mut tx, input).await?;
        tx.commit().await?;
        Ok(bucket)
    }

    pub async fn find_bucket_by_id(&self, id: Uuid) -> TenantryResult<Bucket> {
        let mut tx = self.store.begin_read().await?;
        self.buckets.get_by_id(&mut tx, id).await
    }

    pub async fn find_bucket_by_name(&self, org_id: Uuid, name: &str) -> TenantryResult<Bucket> {
        let mut tx = self.store.begin_read().await?;
        self.buckets.get_by_name(&mut tx, org_id, name).await
    }

    /// All buckets owned by an organization, ordered by name.
    pub async fn find_buckets(&self, org_id: Uuid) -> TenantryResult<Vec<Bucket>> {
        let mut tx = self.store.begin_read().await?;
        self.buckets.list_by_org(&mut tx, org_id).await
    }

    // -- user resource mappings -------------------------------------------

    pub async fn create_user_resource_mapping(
        &self,
        input: CreateUserResourceMapping,
    ) -> TenantryResult<UserResourceMapping> {
        let mut tx = self.store.begin().await?;
        let urm = self.urms.create(&mut tx, input).await?;
        tx.commit().await?;
        Ok(urm)
    }

    pub async fn find_user_resource_mappings(
        &self,
        filter: UserResourceMappingFilter,
    ) -> TenantryResult<Vec<UserResourceMapping>> {
        let mut tx = self.store.begin_read().await?;
        self.urms.find(&mut tx, filter).await
    }
}
