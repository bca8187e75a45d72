//! Key-value implementation of [`BucketStore`].
//!
//! Bucket names are unique per organization, and the owning organization
//! must exist (in the same transaction or already committed).

use chrono::Utc;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::kv::{Transaction, get_record, insert_record, put_record};
use tenantry_core::models::bucket::{Bucket, BucketType, CreateBucket, SYSTEM_BUCKET_PREFIX};
use tenantry_core::models::organization::Organization;
use tenantry_core::repository::BucketStore;
use tracing::debug;
use uuid::Uuid;

use crate::keys;
use crate::validate::validate_name;

#[derive(Debug, Clone, Copy, Default)]
pub struct KvBucketStore;

impl BucketStore for KvBucketStore {
    async fn create<X: Transaction>(&self, tx: &mut X, input: CreateBucket) -> TenantryResult<Bucket> {
        let name = validate_name("bucket", &input.name)?;
        if input.bucket_type == BucketType::User && name.starts_with(SYSTEM_BUCKET_PREFIX) {
            return Err(TenantryError::validation(format!(
                "bucket name {name:?} is reserved: names starting with \
                 '{SYSTEM_BUCKET_PREFIX}' belong to system buckets"
            )));
        }

        get_record::<Organization, _>(tx, &keys::organization(input.org_id))
            .await?
            .ok_or_else(|| TenantryError::not_found("organization", input.org_id))?;

        let index = keys::bucket_index(input.org_id, &name);
        if tx.get(&index).await?.is_some() {
            return Err(TenantryError::name_conflict("bucket", name));
        }

        let now = Utc::now();
        let bucket = Bucket {
            id: Uuid::new_v4(),
            org_id: input.org_id,
            name,
            description: input.description,
            bucket_type: input.bucket_type,
            retention_period_secs: input.retention_period_secs,
            created_at: now,
            updated_at: now,
        };

        put_record(tx, &keys::bucket(bucket.id), &bucket)?;
        insert_record(tx, &index, &bucket.id)?;

        debug!(
            bucket_id = %bucket.id,
            org_id = %bucket.org_id,
            name = %bucket.name,
            "Bucket created"
        );
        Ok(bucket)
    }

    async fn get_by_id<X: Transaction>(&self, tx: &mut X, id: Uuid) -> TenantryResult<Bucket> {
        get_record(tx, &keys::bucket(id))
            .await?
            .ok_or_else(|| TenantryError::not_found("bucket", id))
    }

    async fn get_by_name<X: Transaction>(
        &self,
        tx: &mut X,
        org_id: Uuid,
        name: &str,
    ) -> TenantryResult<Bucket> {
        let id: Uuid = get_record(tx, &keys::bucket_index(org_id, name.trim()))
            .await?
            .ok_or_else(|| {
                TenantryError::not_found("bucket", format!("org={org_id} name={name}"))
            })?;
        self.get_by_id(tx, id).await
    }

    async fn delete<X: Transaction>(&self, tx: &mut X, id: Uuid) -> TenantryResult<()> {
        let bucket = self.get_by_id(tx, id).await?;
        tx.delete(&keys::bucket(id))?;
        tx.delete(&keys::bucket_index(bucket.org_id, &bucket.name))?;
        debug!(bucket_id = %id, "Bucket deleted");
        Ok(())
    }

    async fn list_by_org<X: Transaction>(&self, tx: &mut X, org_id: Uuid) -> TenantryResult<Vec<Bucket>> {
        let index = tx.scan_prefix(&keys::bucket_index_prefix(org_id)).await?;

        let mut buckets = Vec::with_capacity(index.len());
        for (_, raw_id) in index {
            let id: Uuid = serde_json::from_str(&raw_id)?;
            buckets.push(self.get_by_id(tx, id).await?);
        }
        Ok(buckets)
    }
}
