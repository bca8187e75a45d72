//! Onboarding configuration.

use tenantry_auth::AuthConfig;

#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Password policy, pepper and token size for the bootstrap user.
    pub auth: AuthConfig,
    /// Appended to the user name to form the authorization description
    /// (`"admin's Token"`).
    pub token_description_suffix: String,
    /// Retention of the default bucket when the request names none;
    /// `0` keeps data forever.
    pub default_retention_period_secs: u64,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            token_description_suffix: "'s Token".into(),
            default_retention_period_secs: 0,
        }
    }
}
