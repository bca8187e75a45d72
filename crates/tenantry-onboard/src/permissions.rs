//! Permissions granted to the bootstrap authorization.
//!
//! The sequence is part of the credential's identity: consumers compare
//! permission lists positionally, so both the category list and the
//! emission order below are fixed.

use tenantry_core::models::permission::{Action, Permission, Resource, ResourceType};
use uuid::Uuid;

/// Categories granted organization-wide, in emission order.
pub const ORG_RESOURCE_TYPES: [ResourceType; 17] = [
    ResourceType::Authorizations,
    ResourceType::Buckets,
    ResourceType::Dashboards,
    ResourceType::Sources,
    ResourceType::Tasks,
    ResourceType::Telegrafs,
    ResourceType::Users,
    ResourceType::Variables,
    ResourceType::Scrapers,
    ResourceType::Secrets,
    ResourceType::Labels,
    ResourceType::Views,
    ResourceType::Documents,
    ResourceType::NotificationRules,
    ResourceType::NotificationEndpoints,
    ResourceType::Checks,
    ResourceType::Dbrp,
];

/// Read then write on the same resource.
fn read_write(resource: Resource) -> [Permission; 2] {
    [
        Permission::new(Action::Read, resource.clone()),
        Permission::new(Action::Write, resource),
    ]
}

/// The ordered permission list for the owner of a freshly onboarded
/// organization.
///
/// Read/write on every [`ORG_RESOURCE_TYPES`] entry scoped to `org_id`,
/// then read/write on the organization itself, then read/write on the
/// user's own record.
pub fn derive_permissions(org_id: Uuid, user_id: Uuid) -> Vec<Permission> {
    let mut permissions = Vec::with_capacity(ORG_RESOURCE_TYPES.len() * 2 + 4);

    for resource_type in ORG_RESOURCE_TYPES {
        permissions.extend(read_write(Resource::in_org(resource_type, org_id)));
    }
    permissions.extend(read_write(Resource::with_id(ResourceType::Orgs, org_id)));
    permissions.extend(read_write(Resource::with_id(ResourceType::Users, user_id)));

    permissions
}
