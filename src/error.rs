use crate::registry::RegistryError;
use crate::repository::RepositoryName;

/// Fatal errors of the provisioning flow
///
/// Policy application failures never surface here; they are logged and counted.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Failed to configure AWS client: {0}")]
    Configuration(String),

    #[error("Failed to check ECR repository existence for '{name}': {source}")]
    Describe {
        name: RepositoryName,
        #[source]
        source: RegistryError,
    },

    #[error("Failed to create ECR repository '{name}': {source}")]
    Create {
        name: RepositoryName,
        #[source]
        source: RegistryError,
    },
}
