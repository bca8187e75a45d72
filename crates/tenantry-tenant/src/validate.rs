use tenantry_core::error::{TenantryError, TenantryResult};

/// Check an entity name and return it with surrounding whitespace removed.
///
/// Names must contain at least one visible character and no control
/// characters.
pub fn validate_name(entity: &str, name: &str) -> TenantryResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TenantryError::validation(format!("{entity} name is required")));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(TenantryError::validation(format!(
            "{entity} name contains control characters"
        )));
    }
    Ok(trimmed.to_string())
}
