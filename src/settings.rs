// Runtime configuration sourced from CLI flags and environment variables

use tracing::debug;

/// Region used when `--region` is not given
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Environment variable holding the repository access policy document
pub const REPOSITORY_POLICY_ENV: &str = "REPOSITORY_POLICY";

/// Environment variable holding the lifecycle policy document
pub const LIFECYCLE_POLICY_ENV: &str = "LIFECYCLE_POLICY";

/// Read an environment variable, treating empty strings as if the variable is not set.
pub(crate) fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|v| {
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    })
}

/// Policy documents applied to newly created repositories
///
/// Documents are raw JSON text and are handed to ECR as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDocuments {
    pub repository_policy: Option<String>,
    pub lifecycle_policy: Option<String>,
}

impl PolicyDocuments {
    pub fn from_env() -> Self {
        let policies = Self {
            repository_policy: env_var_non_empty(REPOSITORY_POLICY_ENV),
            lifecycle_policy: env_var_non_empty(LIFECYCLE_POLICY_ENV),
        };
        debug!(
            "Policy documents configured: repository={}, lifecycle={}",
            policies.repository_policy.is_some(),
            policies.lifecycle_policy.is_some()
        );
        policies
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub region: String,
    pub policies: PolicyDocuments,
}

impl Settings {
    /// Build settings for the given region, reading policy documents once from the environment
    pub fn from_env(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            policies: PolicyDocuments::from_env(),
        }
    }
}
