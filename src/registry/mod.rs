pub mod ecr;

pub use ecr::EcrRegistry;

use async_trait::async_trait;

use crate::repository::RepositoryName;

/// Outcome of a failed registry control-plane call
///
/// `NotFound` and `AlreadyExists` are the two error codes the provisioning
/// flow branches on; everything else is carried through for reporting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("repository not found")]
    NotFound,

    #[error("repository already exists")]
    AlreadyExists,

    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("request failed: {0}")]
    Transport(String),
}

/// Trait for the container registry control plane
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Look up a single repository by name
    ///
    /// Returns `RegistryError::NotFound` if the repository does not exist.
    async fn describe_repository(&self, name: &RepositoryName) -> Result<(), RegistryError>;

    /// Create a repository
    ///
    /// Returns `RegistryError::AlreadyExists` if the repository was created in the meantime.
    async fn create_repository(&self, name: &RepositoryName) -> Result<(), RegistryError>;

    /// Set the repository access policy
    async fn set_repository_policy(
        &self,
        name: &RepositoryName,
        policy_text: &str,
    ) -> Result<(), RegistryError>;

    /// Put the lifecycle (image expiration) policy
    async fn put_lifecycle_policy(
        &self,
        name: &RepositoryName,
        policy_text: &str,
    ) -> Result<(), RegistryError>;
}
