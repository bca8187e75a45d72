//! Permission domain model: an action on a scoped resource.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every resource category the platform knows about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    Authorizations,
    Buckets,
    Dashboards,
    Orgs,
    Sources,
    Tasks,
    Telegrafs,
    Users,
    Variables,
    Scrapers,
    Secrets,
    Labels,
    Views,
    Documents,
    NotificationRules,
    NotificationEndpoints,
    Checks,
    Dbrp,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Authorizations => "authorizations",
            ResourceType::Buckets => "buckets",
            ResourceType::Dashboards => "dashboards",
            ResourceType::Orgs => "orgs",
            ResourceType::Sources => "sources",
            ResourceType::Tasks => "tasks",
            ResourceType::Telegrafs => "telegrafs",
            ResourceType::Users => "users",
            ResourceType::Variables => "variables",
            ResourceType::Scrapers => "scrapers",
            ResourceType::Secrets => "secrets",
            ResourceType::Labels => "labels",
            ResourceType::Views => "views",
            ResourceType::Documents => "documents",
            ResourceType::NotificationRules => "notificationRules",
            ResourceType::NotificationEndpoints => "notificationEndpoints",
            ResourceType::Checks => "checks",
            ResourceType::Dbrp => "dbrp",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The target of a permission.
///
/// `org_id` widens the grant to every resource of the type inside that
/// organization; `id` narrows it to a single entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Resource {
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<Uuid>,
}

impl Resource {
    /// All resources of `resource_type` within an organization.
    pub fn in_org(resource_type: ResourceType, org_id: Uuid) -> Self {
        Self {
            resource_type,
            id: None,
            org_id: Some(org_id),
        }
    }

    /// One specific entity.
    pub fn with_id(resource_type: ResourceType, id: Uuid) -> Self {
        Self {
            resource_type,
            id: Some(id),
            org_id: None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(org_id) = self.org_id {
            write!(f, "orgs/{org_id}/")?;
        }
        f.write_str(self.resource_type.as_str())?;
        if let Some(id) = self.id {
            write!(f, "/{id}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Permission {
    pub action: Action,
    pub resource: Resource,
}

impl Permission {
    pub fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_scoped_permission_display() {
        let org = Uuid::nil();
        let p = Permission::new(Action::Read, Resource::in_org(ResourceType::Buckets, org));
        assert_eq!(p.to_string(), format!("read:orgs/{org}/buckets"));
    }

    #[test]
    fn id_scoped_permission_display() {
        let id = Uuid::new_v4();
        let p = Permission::new(Action::Write, Resource::with_id(ResourceType::Users, id));
        assert_eq!(p.to_string(), format!("write:users/{id}"));
    }

    #[test]
    fn resource_type_serializes_as_camel_case() {
        let json = serde_json::to_string(&ResourceType::NotificationEndpoints).unwrap();
        assert_eq!(json, "\"notificationEndpoints\"");
        assert_eq!(
            serde_json::to_string(&ResourceType::Dbrp).unwrap(),
            "\"dbrp\""
        );
    }
}
