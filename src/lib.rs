//! Ensure an AWS ECR repository exists
//!
//! The repository is created when missing and, on creation, the repository
//! and lifecycle policies from the environment are applied best-effort.

pub mod error;
pub mod provisioner;
pub mod registry;
pub mod repository;
pub mod settings;

pub use error::ProvisionError;
pub use provisioner::{Provisioned, Provisioner};
pub use registry::{EcrRegistry, RegistryClient, RegistryError};
pub use repository::RepositoryName;
pub use settings::{PolicyDocuments, Settings};
