//! Key-value implementation of [`UserResourceMappingStore`].
//!
//! Mappings are keyed by resource first, so listing the members of one
//! resource is a single prefix scan.

use chrono::Utc;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::kv::{Transaction, get_record, insert_record, scan_records};
use tenantry_core::models::urm::{
    CreateUserResourceMapping, UserResourceMapping, UserResourceMappingFilter,
};
use tenantry_core::models::user::User;
use tenantry_core::repository::UserResourceMappingStore;
use tracing::debug;
use uuid::Uuid;

use crate::keys;

#[derive(Debug, Clone, Copy, Default)]
pub struct KvUserResourceMappingStore;

impl UserResourceMappingStore for KvUserResourceMappingStore {
    async fn create<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateUserResourceMapping,
    ) -> TenantryResult<UserResourceMapping> {
        get_record::<User, _>(tx, &keys::user(input.user_id))
            .await?
            .ok_or_else(|| TenantryError::not_found("user", input.user_id))?;

        let key = keys::user_resource_mapping(input.resource_id, input.user_id);
        if tx.get(&key).await?.is_some() {
            return Err(TenantryError::name_conflict(
                "user resource mapping",
                format!("{}:{}", input.resource_id, input.user_id),
            ));
        }

        let urm = UserResourceMapping {
            user_id: input.user_id,
            resource_id: input.resource_id,
            resource_type: input.resource_type,
            user_type: input.user_type,
            created_at: Utc::now(),
        };
        insert_record(tx, &key, &urm)?;

        debug!(
            user_id = %urm.user_id,
            resource_id = %urm.resource_id,
            resource_type = %urm.resource_type,
            user_type = ?urm.user_type,
            "User resource mapping created"
        );
        Ok(urm)
    }

    async fn find<X: Transaction>(
        &self,
        tx: &mut X,
        filter: UserResourceMappingFilter,
    ) -> TenantryResult<Vec<UserResourceMapping>> {
        let prefix = match filter.resource_id {
            Some(resource_id) => keys::user_resource_mapping_prefix(resource_id),
            None => keys::USER_RESOURCE_MAPPINGS.to_string(),
        };

        let urms: Vec<UserResourceMapping> = scan_records(tx, &prefix).await?;
        Ok(urms.into_iter().filter(|urm| filter.matches(urm)).collect())
    }

    async fn delete<X: Transaction>(
        &self,
        tx: &mut X,
        resource_id: Uuid,
        user_id: Uuid,
    ) -> TenantryResult<()> {
        let key = keys::user_resource_mapping(resource_id, user_id);
        if tx.get(&key).await?.is_none() {
            return Err(TenantryError::not_found(
                "user resource mapping",
                format!("{resource_id}:{user_id}"),
            ));
        }
        tx.delete(&key)?;
        Ok(())
    }
}
