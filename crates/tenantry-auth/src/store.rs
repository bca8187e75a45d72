//! Key-value implementation of [`AuthorizationIssuer`].
//!
//! Authorizations live under `authorizations/<id>`; the SHA-256 of each
//! token is indexed under `authorizationindex/<hash>` so a presented token
//! can be resolved without storing it.

use chrono::Utc;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::kv::{Transaction, get_record, insert_record, put_record, scan_records};
use tenantry_core::models::authorization::{
    Authorization, AuthorizationStatus, CreateAuthorization,
};
use tenantry_core::repository::AuthorizationIssuer;
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

const AUTHORIZATIONS: &str = "authorizations/";

fn authorization_key(id: Uuid) -> String {
    format!("{AUTHORIZATIONS}{id}")
}

fn token_index_key(token_hash: &str) -> String {
    format!("authorizationindex/{token_hash}")
}

/// Issues and looks up authorizations in the key-value store.
#[derive(Debug, Clone, Default)]
pub struct KvAuthorizationStore {
    config: AuthConfig,
}

impl KvAuthorizationStore {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub async fn get_by_id<X: Transaction>(
        &self,
        tx: &mut X,
        id: Uuid,
    ) -> TenantryResult<Authorization> {
        get_record(tx, &authorization_key(id))
            .await?
            .ok_or_else(|| TenantryError::not_found("authorization", id))
    }

    /// Resolve a raw token to its authorization.
    pub async fn get_by_token<X: Transaction>(
        &self,
        tx: &mut X,
        raw_token: &str,
    ) -> TenantryResult<Authorization> {
        let token_hash = token::hash_token(raw_token);
        let id: Uuid = get_record(tx, &token_index_key(&token_hash))
            .await?
            .ok_or_else(|| TenantryError::not_found("authorization", "token"))?;
        self.get_by_id(tx, id).await
    }

    pub async fn find_by_user<X: Transaction>(
        &self,
        tx: &mut X,
        user_id: Uuid,
    ) -> TenantryResult<Vec<Authorization>> {
        let all: Vec<Authorization> = scan_records(tx, AUTHORIZATIONS).await?;
        Ok(all.into_iter().filter(|a| a.user_id == user_id).collect())
    }
}

impl AuthorizationIssuer for KvAuthorizationStore {
    async fn create_authorization<X: Transaction>(
        &self,
        tx: &mut X,
        input: CreateAuthorization,
    ) -> TenantryResult<Authorization> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(TenantryError::validation(
                "authorization description is required",
            ));
        }
        if input.permissions.is_empty() {
            return Err(TenantryError::validation(
                "authorization must grant at least one permission",
            ));
        }

        let raw_token = match input.token {
            Some(supplied) if supplied.trim().is_empty() => {
                return Err(AuthError::TokenInvalid("token must not be empty".into()).into());
            }
            Some(supplied) => supplied,
            None => token::generate_token(self.config.token_bytes),
        };

        let token_hash = token::hash_token(&raw_token);
        let index = token_index_key(&token_hash);
        if tx.get(&index).await?.is_some() {
            return Err(TenantryError::name_conflict("authorization", "token"));
        }

        let now = Utc::now();
        let auth = Authorization {
            id: Uuid::new_v4(),
            org_id: input.org_id,
            user_id: input.user_id,
            description: description.to_string(),
            status: AuthorizationStatus::Active,
            permissions: input.permissions,
            token_hash,
            token: None,
            created_at: now,
            updated_at: now,
        };

        put_record(tx, &authorization_key(auth.id), &auth)?;
        insert_record(tx, &index, &auth.id)?;

        debug!(
            authorization_id = %auth.id,
            user_id = %auth.user_id,
            org_id = %auth.org_id,
            permissions = auth.permissions.len(),
            "Authorization created"
        );

        Ok(Authorization {
            token: Some(raw_token),
            ..auth
        })
    }
}
