// Idempotent repository provisioning
//
// Start -> Describe -> AlreadyExists: done
//                   -> NotFound -> Create -> Created -> apply policies -> done
//                                         -> AlreadyExists (race) -> done
//                   -> other error: fail

use tracing::{info, info_span, warn, Instrument};

use crate::error::ProvisionError;
use crate::registry::{RegistryClient, RegistryError};
use crate::repository::RepositoryName;
use crate::settings::PolicyDocuments;

/// Successful outcome of [`Provisioner::ensure_repository`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The repository existed before; nothing was changed
    AlreadyExisted,
    /// The repository was created by us. `policy_failures` counts policy
    /// documents that could not be applied.
    Created { policy_failures: usize },
    /// Another actor created the repository between describe and create.
    /// Policies are not applied in this case.
    CreatedConcurrently,
}

/// Ensures a repository exists, creating it and applying policies when missing
pub struct Provisioner<R> {
    registry: R,
    policies: PolicyDocuments,
}

impl<R: RegistryClient> Provisioner<R> {
    pub fn new(registry: R, policies: PolicyDocuments) -> Self {
        Self { registry, policies }
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &R {
        &self.registry
    }

    /// Make sure the repository exists
    ///
    /// Errors from describe or create are fatal. Policy errors are logged and
    /// do not affect the result.
    pub async fn ensure_repository(
        &self,
        name: &RepositoryName,
    ) -> Result<Provisioned, ProvisionError> {
        let span = info_span!("ensure_repository", repository = %name);
        self.ensure_repository_inner(name).instrument(span).await
    }

    async fn ensure_repository_inner(
        &self,
        name: &RepositoryName,
    ) -> Result<Provisioned, ProvisionError> {
        match self.registry.describe_repository(name).await {
            Ok(()) => {
                info!("Repository {} already exists", name);
                return Ok(Provisioned::AlreadyExisted);
            }
            Err(RegistryError::NotFound) => {
                info!("Repository {} not found, creating it", name);
            }
            Err(source) => {
                return Err(ProvisionError::Describe {
                    name: name.clone(),
                    source,
                });
            }
        }

        match self.registry.create_repository(name).await {
            Ok(()) => {
                info!("Repository {} created successfully", name);
            }
            Err(RegistryError::AlreadyExists) => {
                warn!(
                    "Repository {} was created concurrently, skipping policy application",
                    name
                );
                return Ok(Provisioned::CreatedConcurrently);
            }
            Err(source) => {
                return Err(ProvisionError::Create {
                    name: name.clone(),
                    source,
                });
            }
        }

        let policy_failures = self.apply_policies(name).await;
        Ok(Provisioned::Created { policy_failures })
    }

    /// Apply configured policy documents, returning the number of failures
    async fn apply_policies(&self, name: &RepositoryName) -> usize {
        let mut failures = 0;

        if let Some(policy) = &self.policies.repository_policy {
            match self.registry.set_repository_policy(name, policy).await {
                Ok(()) => info!("Repository policy applied to {}", name),
                Err(e) => {
                    warn!("Failed to set repository policy on {}: {}", name, e);
                    failures += 1;
                }
            }
        }

        if let Some(policy) = &self.policies.lifecycle_policy {
            match self.registry.put_lifecycle_policy(name, policy).await {
                Ok(()) => info!("Lifecycle policy applied to {}", name),
                Err(e) => {
                    warn!("Failed to put lifecycle policy on {}: {}", name, e);
                    failures += 1;
                }
            }
        }

        failures
    }
}
