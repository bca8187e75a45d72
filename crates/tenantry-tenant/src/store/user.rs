//! Key-value implementation of [`UserStore`].

use chrono::Utc;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::kv::{Transaction, get_record, insert_record, put_record, scan_records};
use tenantry_core::models::user::{CreateUser, User, UserFilter};
use tenantry_core::repository::UserStore;
use tracing::debug;
use uuid::Uuid;

use crate::keys;
use crate::validate::validate_name;

#[derive(Debug, Clone, Copy, Default)]
pub struct KvUserStore;

impl UserStore for KvUserStore {
    async fn create<X: Transaction>(&self, tx: &mut X, input: CreateUser) -> TenantryResult<User> {
        let name = validate_name("user", &input.name)?;
        let index = keys::user_index(&name);

        if tx.get(&index).await?.is_some() {
            return Err(TenantryError::name_conflict("user", name));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            status: input.status,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };

        put_record(tx, &keys::user(user.id), &user)?;
        insert_record(tx, &index, &user.id)?;

        debug!(user_id = %user.id, name = %user.name, "User created");
        Ok(user)
    }

    async fn get_by_id<X: Transaction>(&self, tx: &mut X, id: Uuid) -> TenantryResult<User> {
        get_record(tx, &keys::user(id))
            .await?
            .ok_or_else(|| TenantryError::not_found("user", id))
    }

    async fn get_by_name<X: Transaction>(&self, tx: &mut X, name: &str) -> TenantryResult<User> {
        let id: Uuid = get_record(tx, &keys::user_index(name.trim()))
            .await?
            .ok_or_else(|| TenantryError::not_found("user", format!("name={name}")))?;
        self.get_by_id(tx, id).await
    }

    async fn delete<X: Transaction>(&self, tx: &mut X, id: Uuid) -> TenantryResult<()> {
        let user = self.get_by_id(tx, id).await?;
        tx.delete(&keys::user(id))?;
        tx.delete(&keys::user_index(&user.name))?;
        debug!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn list<X: Transaction>(&self, tx: &mut X, filter: UserFilter) -> TenantryResult<Vec<User>> {
        let users: Vec<User> = scan_records(tx, keys::USERS).await?;
        Ok(users
            .into_iter()
            .filter(|u| filter.status.is_none_or(|s| s == u.status))
            .collect())
    }
}
