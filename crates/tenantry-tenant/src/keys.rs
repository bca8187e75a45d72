//! Key layout of tenant records in the key-value store.
//!
//! Records live under `<kind>/<id>`; unique names are enforced through
//! `<kind>index/<name>` entries that hold the owning record's id.

use uuid::Uuid;

pub const USERS: &str = "users/";
pub const ORGANIZATIONS: &str = "organizations/";
pub const BUCKETS: &str = "buckets/";
pub const USER_RESOURCE_MAPPINGS: &str = "userresourcemappings/";

pub fn user(id: Uuid) -> String {
    format!("{USERS}{id}")
}

pub fn user_index(name: &str) -> String {
    format!("userindex/{name}")
}

pub fn organization(id: Uuid) -> String {
    format!("{ORGANIZATIONS}{id}")
}

pub fn organization_index(name: &str) -> String {
    format!("organizationindex/{name}")
}

pub fn bucket(id: Uuid) -> String {
    format!("{BUCKETS}{id}")
}

pub fn bucket_index(org_id: Uuid, name: &str) -> String {
    format!("{}{name}", bucket_index_prefix(org_id))
}

pub fn bucket_index_prefix(org_id: Uuid) -> String {
    format!("bucketindex/{org_id}/")
}

pub fn user_resource_mapping(resource_id: Uuid, user_id: Uuid) -> String {
    format!("{}{user_id}", user_resource_mapping_prefix(resource_id))
}

pub fn user_resource_mapping_prefix(resource_id: Uuid) -> String {
    format!("{USER_RESOURCE_MAPPINGS}{resource_id}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_index_is_scoped_by_org() {
        let org = Uuid::new_v4();
        let key = bucket_index(org, "metrics");
        assert!(key.starts_with(&bucket_index_prefix(org)));
        assert!(key.ends_with("/metrics"));
    }

    #[test]
    fn mapping_keys_group_by_resource() {
        let resource = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let key = user_resource_mapping(resource, user_id);
        assert_eq!(key, format!("userresourcemappings/{resource}/{user_id}"));
        assert!(key.starts_with(&user_resource_mapping_prefix(resource)));
    }

    #[test]
    fn index_keys_do_not_share_record_prefixes() {
        assert!(!user_index("a").starts_with(USERS));
        assert!(!organization_index("a").starts_with(ORGANIZATIONS));
    }
}
