//! Key-value implementation of [`OrganizationStore`].

use chrono::Utc;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::kv::{Transaction, get_record, insert_record, put_record, scan_records};
use tenantry_core::models::organization::{CreateOrganization, Organization};
use tenantry_core::repository::OrganizationStore;
use tracing::debug;
use uuid::Uuid;

use crate::keys;
use crate::validate::validate_name;

#[derive(Debug, Clone, Copy, Default)]
pub struct KvOrganizationStore;

impl OrganizationStore for KvOrganizationStore {
    async fn create<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateOrganization,
    ) -> TenantryResult<Organization> {
        let name = validate_name("organization", &input.name)?;
        let index = keys::organization_index(&name);

        if tx.get(&index).await?.is_some() {
            return Err(TenantryError::name_conflict("organization", name));
        }

        let now = Utc::now();
        let org = Organization {
            id: Uuid::new_v4(),
            name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };

        put_record(tx, &keys::organization(org.id), &org)?;
        insert_record(tx, &index, &org.id)?;

        debug!(org_id = %org.id, name = %org.name, "Organization created");
        Ok(org)
    }

    async fn get_by_id<X: Transaction>(&self, tx: &mut X, id: Uuid) -> TenantryResult<Organization> {
        get_record(tx, &keys::organization(id))
            .await?
            .ok_or_else(|| TenantryError::not_found("organization", id))
    }

    async fn get_by_name<X: Transaction>(
        &self,
        tx: &mut X,
        name: &str,
    ) -> TenantryResult<Organization> {
        let id: Uuid = get_record(tx, &keys::organization_index(name.trim()))
            .await?
            .ok_or_else(|| TenantryError::not_found("organization", format!("name={name}")))?;
        self.get_by_id(tx, id).await
    }

    async fn delete<X: Transaction>(&self, tx: &mut X, id: Uuid) -> TenantryResult<()> {
        let org = self.get_by_id(tx, id).await?;
        tx.delete(&keys::organization(id))?;
        tx.delete(&keys::organization_index(&org.name))?;
        debug!(org_id = %id, "Organization deleted");
        Ok(())
    }

    async fn list<X: Transaction>(&self, tx: &mut X) -> TenantryResult<Vec<Organization>> {
        scan_records(tx, keys::ORGANIZATIONS).await
    }
}
