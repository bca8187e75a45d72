//! Integration tests for the tenant entity stores using in-memory
//! SurrealDB.

use tenantry_core::error::TenantryError;
use tenantry_core::kv::{Store, Transaction};
use tenantry_core::models::bucket::{BucketType, CreateBucket};
use tenantry_core::models::organization::CreateOrganization;
use tenantry_core::models::permission::ResourceType;
use tenantry_core::models::urm::{CreateUserResourceMapping, UserResourceMappingFilter, UserType};
use tenantry_core::models::user::{CreateUser, UserFilter, UserStatus};
use tenantry_core::repository::{BucketStore, OrganizationStore, UserStore};
use tenantry_db::{DbConfig, DbManager, SurrealStore};
use tenantry_tenant::TenantService;
use uuid::Uuid;

type TestStore = SurrealStore<surrealdb::engine::local::Db>;

/// Helper: spin up in-memory DB and wrap it in a tenant service.
async fn setup() -> TenantService<TestStore> {
    let manager = DbManager::in_memory(&DbConfig::default()).await.unwrap();
    TenantService::new(manager.store())
}

fn org(name: &str) -> CreateOrganization {
    CreateOrganization {
        name: name.into(),
        description: None,
    }
}

// -----------------------------------------------------------------------
// Users
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_user() {
    let svc = setup().await;

    let user = svc.create_user(CreateUser::active("alice")).await.unwrap();
    assert_eq!(user.name, "alice");
    assert_eq!(user.status, UserStatus::Active);
    assert!(user.password_hash.is_none());

    let by_id = svc.find_user_by_id(user.id).await.unwrap();
    assert_eq!(by_id, user);

    let by_name = svc.find_user_by_name("alice").await.unwrap();
    assert_eq!(by_name.id, user.id);
}

#[tokio::test]
async fn duplicate_user_name_conflicts() {
    let svc = setup().await;
    svc.create_user(CreateUser::active("alice")).await.unwrap();

    let err = svc
        .create_user(CreateUser::active(" alice "))
        .await
        .unwrap_err();
    assert!(
        matches!(err, TenantryError::NameConflict { ref entity, .. } if entity == "user"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn blank_user_name_is_rejected() {
    let svc = setup().await;
    let err = svc.create_user(CreateUser::active("  ")).await.unwrap_err();
    assert!(matches!(err, TenantryError::Validation { .. }));
    assert!(svc.find_users(UserFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let svc = setup().await;
    let err = svc.find_user_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TenantryError::NotFound { .. }));
}

#[tokio::test]
async fn list_users_filters_by_status() {
    let svc = setup().await;
    svc.create_user(CreateUser::active("active")).await.unwrap();
    svc.create_user(CreateUser {
        name: "inactive".into(),
        status: UserStatus::Inactive,
        password_hash: None,
    })
    .await
    .unwrap();

    let all = svc.find_users(UserFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let active = svc
        .find_users(UserFilter {
            status: Some(UserStatus::Active),
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "active");
}

#[tokio::test]
async fn delete_user_removes_mappings_and_frees_name() {
    let svc = setup().await;
    let user = svc.create_user(CreateUser::active("bob")).await.unwrap();
    let org = svc.create_organization(org("acme")).await.unwrap();
    svc.create_user_resource_mapping(CreateUserResourceMapping {
        user_id: user.id,
        resource_id: org.id,
        resource_type: ResourceType::Orgs,
        user_type: UserType::Member,
    })
    .await
    .unwrap();

    svc.delete_user(user.id).await.unwrap();

    assert!(matches!(
        svc.find_user_by_id(user.id).await,
        Err(TenantryError::NotFound { .. })
    ));
    let urms = svc
        .find_user_resource_mappings(UserResourceMappingFilter::default())
        .await
        .unwrap();
    assert!(urms.is_empty());

    // The name can be reused once the user is gone.
    svc.create_user(CreateUser::active("bob")).await.unwrap();
}

// -----------------------------------------------------------------------
// Organizations & buckets
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_find_organization() {
    let svc = setup().await;
    let created = svc.create_organization(org("acme")).await.unwrap();

    assert_eq!(svc.find_organization_by_id(created.id).await.unwrap(), created);
    assert_eq!(
        svc.find_organization_by_name("acme").await.unwrap().id,
        created.id
    );
    assert_eq!(svc.find_organizations().await.unwrap().len(), 1);

    let err = svc.create_organization(org("acme")).await.unwrap_err();
    assert!(
        matches!(err, TenantryError::NameConflict { ref entity, .. } if entity == "organization")
    );
}

#[tokio::test]
async fn bucket_names_are_unique_per_org() {
    let svc = setup().await;
    let a = svc.create_organization(org("a")).await.unwrap();
    let b = svc.create_organization(org("b")).await.unwrap();

    svc.create_bucket(CreateBucket::new(a.id, "metrics")).await.unwrap();
    svc.create_bucket(CreateBucket::new(b.id, "metrics")).await.unwrap();

    let err = svc
        .create_bucket(CreateBucket::new(a.id, "metrics"))
        .await
        .unwrap_err();
    assert!(matches!(err, TenantryError::NameConflict { .. }));
}

#[tokio::test]
async fn find_buckets_lists_only_the_org_in_name_order() {
    let svc = setup().await;
    let a = svc.create_organization(org("a")).await.unwrap();
    let b = svc.create_organization(org("b")).await.unwrap();

    svc.create_bucket(CreateBucket::new(a.id, "zeta")).await.unwrap();
    svc.create_bucket(CreateBucket::new(a.id, "alpha")).await.unwrap();
    svc.create_bucket(CreateBucket::new(b.id, "other")).await.unwrap();

    let names: Vec<String> = svc
        .find_buckets(a.id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);

    let found = svc.find_bucket_by_name(a.id, "zeta").await.unwrap();
    assert_eq!(found.org_id, a.id);
    assert_eq!(svc.find_bucket_by_id(found.id).await.unwrap(), found);
}

#[tokio::test]
async fn reserved_bucket_names_are_rejected_for_user_buckets() {
    let svc = setup().await;
    let a = svc.create_organization(org("a")).await.unwrap();

    let err = svc
        .create_bucket(CreateBucket::new(a.id, "_monitoring"))
        .await
        .unwrap_err();
    assert!(matches!(err, TenantryError::Validation { .. }));

    let system = svc
        .create_bucket(CreateBucket {
            bucket_type: BucketType::System,
            retention_period_secs: 604_800,
            ..CreateBucket::new(a.id, "_monitoring")
        })
        .await
        .unwrap();
    assert_eq!(system.bucket_type, BucketType::System);
    assert_eq!(system.retention_period_secs, 604_800);
}

#[tokio::test]
async fn bucket_requires_existing_org() {
    let svc = setup().await;
    let err = svc
        .create_bucket(CreateBucket::new(Uuid::new_v4(), "metrics"))
        .await
        .unwrap_err();
    assert!(matches!(err, TenantryError::NotFound { ref entity, .. } if entity == "organization"));
}

// -----------------------------------------------------------------------
// Mappings
// -----------------------------------------------------------------------

#[tokio::test]
async fn mappings_filter_by_resource_and_user() {
    let svc = setup().await;
    let alice = svc.create_user(CreateUser::active("alice")).await.unwrap();
    let bob = svc.create_user(CreateUser::active("bob")).await.unwrap();
    let acme = svc.create_organization(org("acme")).await.unwrap();
    let initech = svc.create_organization(org("initech")).await.unwrap();

    for (user_id, resource_id, user_type) in [
        (alice.id, acme.id, UserType::Owner),
        (bob.id, acme.id, UserType::Member),
        (bob.id, initech.id, UserType::Owner),
    ] {
        svc.create_user_resource_mapping(CreateUserResourceMapping {
            user_id,
            resource_id,
            resource_type: ResourceType::Orgs,
            user_type,
        })
        .await
        .unwrap();
    }

    let acme_members = svc
        .find_user_resource_mappings(UserResourceMappingFilter {
            resource_id: Some(acme.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(acme_members.len(), 2);

    let owners = svc
        .find_user_resource_mappings(UserResourceMappingFilter {
            resource_id: Some(acme.id),
            user_type: Some(UserType::Owner),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].user_id, alice.id);

    let bobs = svc
        .find_user_resource_mappings(UserResourceMappingFilter {
            user_id: Some(bob.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(bobs.len(), 2);
}

#[tokio::test]
async fn duplicate_mapping_conflicts() {
    let svc = setup().await;
    let alice = svc.create_user(CreateUser::active("alice")).await.unwrap();
    let acme = svc.create_organization(org("acme")).await.unwrap();
    let mapping = CreateUserResourceMapping {
        user_id: alice.id,
        resource_id: acme.id,
        resource_type: ResourceType::Orgs,
        user_type: UserType::Owner,
    };

    svc.create_user_resource_mapping(mapping.clone()).await.unwrap();
    let err = svc.create_user_resource_mapping(mapping).await.unwrap_err();
    assert!(matches!(err, TenantryError::NameConflict { .. }));
}

// -----------------------------------------------------------------------
// Cross-store transactions
// -----------------------------------------------------------------------

#[tokio::test]
async fn stores_share_a_caller_transaction() {
    let svc = setup().await;

    let mut tx = svc.store().begin().await.unwrap();
    let created = svc
        .organizations()
        .create(&mut tx, org("acme"))
        .await
        .unwrap();
    // The bucket store sees the uncommitted organization.
    svc.buckets()
        .create(&mut tx, CreateBucket::new(created.id, "metrics"))
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    assert!(svc.find_organizations().await.unwrap().is_empty());
    assert!(svc.find_buckets(created.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn entity_stores_work_inside_one_commit() {
    let svc = setup().await;

    let mut tx = svc.store().begin().await.unwrap();
    let user = svc
        .users()
        .create(&mut tx, CreateUser::active("carol"))
        .await
        .unwrap();
    let found = svc.users().get_by_name(&mut tx, "carol").await.unwrap();
    assert_eq!(found.id, user.id);
    tx.commit().await.unwrap();

    assert_eq!(svc.find_user_by_name("carol").await.unwrap().id, user.id);
}
