//! Onboarding service: gate check and the bootstrap transaction.

use chrono::Utc;
use tenantry_auth::{KvAuthorizationStore, password};
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::kv::{Store, Transaction, insert_record};
use tenantry_core::models::authorization::CreateAuthorization;
use tenantry_core::models::bucket::CreateBucket;
use tenantry_core::models::onboarding::{OnboardingRecord, OnboardingRequest, OnboardingResult};
use tenantry_core::models::organization::CreateOrganization;
use tenantry_core::models::permission::ResourceType;
use tenantry_core::models::urm::{CreateUserResourceMapping, UserType};
use tenantry_core::models::user::{CreateUser, UserFilter, UserStatus};
use tenantry_core::repository::{
    AuthorizationIssuer, BucketStore, OrganizationStore, UserResourceMappingStore, UserStore,
};
use tenantry_tenant::{TenantService, validate_name};
use tracing::{error, info, warn};

use crate::config::OnboardingConfig;
use crate::permissions::derive_permissions;

/// Ledger of completed onboardings, `onboardings/<sequence>`.
pub const ONBOARDINGS: &str = "onboardings/";

fn onboarding_key(sequence: usize) -> String {
    format!("{ONBOARDINGS}{sequence:010}")
}

/// Bootstraps an installation with its first user.
///
/// Generic over the store and the authorization issuer so tests can
/// substitute either.
#[derive(Clone)]
pub struct OnboardingService<S: Store, A: AuthorizationIssuer = KvAuthorizationStore> {
    tenant: TenantService<S>,
    issuer: A,
    config: OnboardingConfig,
}

impl<S: Store> OnboardingService<S, KvAuthorizationStore> {
    pub fn new(tenant: TenantService<S>, config: OnboardingConfig) -> Self {
        let issuer = KvAuthorizationStore::new(config.auth.clone());
        Self::with_issuer(tenant, issuer, config)
    }
}

impl<S: Store, A: AuthorizationIssuer> OnboardingService<S, A> {
    pub fn with_issuer(tenant: TenantService<S>, issuer: A, config: OnboardingConfig) -> Self {
        Self {
            tenant,
            issuer,
            config,
        }
    }

    pub fn tenant(&self) -> &TenantService<S> {
        &self.tenant
    }

    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    /// Whether the installation still accepts onboarding, i.e. no active
    /// user exists yet.
    pub async fn is_onboarding(&self) -> TenantryResult<bool> {
        let mut tx = self.tenant.store().begin_read().await?;
        self.gate_open(&mut tx).await
    }

    /// Create the first user, their organization, a default bucket, the
    /// owner mapping and an all-access authorization.
    ///
    /// Everything is written in one transaction: on any error nothing
    /// from the attempt is persisted. Fails with
    /// [`TenantryError::OnboardingDisabled`] once an active user exists,
    /// including when a concurrent onboarding commits first.
    pub async fn onboard_user(
        &self,
        request: OnboardingRequest,
    ) -> TenantryResult<OnboardingResult> {
        self.validate_request(&request)?;

        info!(
            user = %request.user,
            org = %request.org,
            bucket = %request.bucket,
            "Onboarding requested"
        );

        // Writers sharing this store are serialized here. Any other writer
        // that passes the gate concurrently claims the same ledger key, and
        // only one of the two commits can create it.
        let mut tx = self.tenant.store().begin().await?;

        let result = match self.bootstrap(&mut tx, &request).await {
            Ok(result) => result,
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "Onboarding rollback failed");
                }
                return Err(e);
            }
        };

        tx.commit().await.map_err(|e| match e {
            TenantryError::WriteConflict(detail) => {
                warn!(%detail, "Onboarding rejected: a concurrent onboarding committed first");
                TenantryError::OnboardingDisabled
            }
            other => {
                error!(step = "commit", error = %other, "Onboarding failed");
                other
            }
        })?;

        info!(
            user_id = %result.user.id,
            org_id = %result.org.id,
            bucket_id = %result.bucket.id,
            authorization_id = %result.auth.id,
            "Onboarding completed"
        );

        Ok(result)
    }

    fn validate_request(&self, request: &OnboardingRequest) -> TenantryResult<()> {
        validate_name("user", &request.user)?;
        validate_name("organization", &request.org)?;
        validate_name("bucket", &request.bucket)?;
        if let Some(pw) = &request.password {
            password::check_password_policy(pw, &self.config.auth)?;
        }
        Ok(())
    }

    async fn gate_open(&self, tx: &mut S::Tx) -> TenantryResult<bool> {
        let active = self
            .tenant
            .users()
            .list(
                tx,
                UserFilter {
                    status: Some(UserStatus::Active),
                },
            )
            .await?;
        Ok(active.is_empty())
    }

    async fn bootstrap(
        &self,
        tx: &mut S::Tx,
        request: &OnboardingRequest,
    ) -> TenantryResult<OnboardingResult> {
        // 1. Gate.
        if !self.gate_open(tx).await? {
            warn!(user = %request.user, "Onboarding rejected: installation already has an active user");
            return Err(TenantryError::OnboardingDisabled);
        }
        let sequence = tx.scan_prefix(ONBOARDINGS).await?.len();

        // 2. User, with the password hash when one was supplied.
        let password_hash = request
            .password
            .as_deref()
            .map(|pw| password::hash_password(pw, &self.config.auth))
            .transpose()
            .map_err(TenantryError::from)
            .inspect_err(|e| step_failed("hash_password", e))?;

        let user = self
            .tenant
            .users()
            .create(
                tx,
                CreateUser {
                    name: request.user.clone(),
                    status: UserStatus::Active,
                    password_hash,
                },
            )
            .await
            .inspect_err(|e| step_failed("create_user", e))?;

        // 3. Organization.
        let org = self
            .tenant
            .organizations()
            .create(
                tx,
                CreateOrganization {
                    name: request.org.clone(),
                    description: None,
                },
            )
            .await
            .inspect_err(|e| step_failed("create_organization", e))?;

        // 4. Default bucket.
        let retention = request
            .retention_period_secs
            .unwrap_or(self.config.default_retention_period_secs);
        let bucket = self
            .tenant
            .buckets()
            .create(
                tx,
                CreateBucket {
                    retention_period_secs: retention,
                    ..CreateBucket::new(org.id, request.bucket.clone())
                },
            )
            .await
            .inspect_err(|e| step_failed("create_bucket", e))?;

        // 5. The user owns the organization.
        self.tenant
            .user_resource_mappings()
            .create(
                tx,
                CreateUserResourceMapping {
                    user_id: user.id,
                    resource_id: org.id,
                    resource_type: ResourceType::Orgs,
                    user_type: UserType::Owner,
                },
            )
            .await
            .inspect_err(|e| step_failed("create_user_resource_mapping", e))?;

        // 6-7. All-access authorization.
        let auth = self
            .issuer
            .create_authorization(
                tx,
                CreateAuthorization {
                    org_id: org.id,
                    user_id: user.id,
                    description: format!("{}{}", user.name, self.config.token_description_suffix),
                    permissions: derive_permissions(org.id, user.id),
                    token: request.token.clone(),
                },
            )
            .await
            .inspect_err(|e| step_failed("create_authorization", e))?;

        // 8. Ledger entry; conflicts surface on commit.
        insert_record(
            tx,
            &onboarding_key(sequence),
            &OnboardingRecord {
                user_id: user.id,
                org_id: org.id,
                completed_at: Utc::now(),
            },
        )?;

        Ok(OnboardingResult {
            user: user.without_password(),
            org,
            bucket,
            auth,
        })
    }
}

fn step_failed(step: &'static str, e: &TenantryError) {
    match e {
        TenantryError::Validation { .. } | TenantryError::NameConflict { .. } => {
            warn!(step, error = %e, "Onboarding step rejected");
        }
        _ => error!(step, error = %e, "Onboarding step failed"),
    }
}
