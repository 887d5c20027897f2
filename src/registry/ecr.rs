use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ecr::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ecr::Client as EcrClient;
use tracing::debug;

use crate::error::ProvisionError;
use crate::registry::{RegistryClient, RegistryError};
use crate::repository::RepositoryName;

/// Extract a clean error message from an AWS SDK error's Debug output
///
/// The AWS SDK errors have verbose Debug output, but we can extract just the
/// meaningful message by parsing for the `message: Some("...")` pattern.
fn format_sdk_error<E: std::fmt::Debug>(err: &E) -> String {
    let debug_str = format!("{:?}", err);

    if let Some(start) = debug_str.find("message: Some(\"") {
        let start = start + 15; // length of 'message: Some("'
        if let Some(end) = debug_str[start..].find("\")") {
            return debug_str[start..start + end].to_string();
        }
    }

    // Last resort: return a truncated debug string
    if debug_str.len() > 200 {
        let mut cut = 200;
        while !debug_str.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &debug_str[..cut])
    } else {
        debug_str
    }
}

/// Map an SDK error that is neither "not found" nor "already exists"
fn unrecognized_error<E, R>(err: &SdkError<E, R>) -> RegistryError
where
    E: ProvideErrorMetadata + std::fmt::Debug,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service_err) => RegistryError::Api {
            code: service_err.code().unwrap_or("Unknown").to_string(),
            message: service_err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| format_sdk_error(service_err)),
        },
        None => RegistryError::Transport(format_sdk_error(err)),
    }
}

/// AWS ECR control-plane client
pub struct EcrRegistry {
    client: EcrClient,
}

impl EcrRegistry {
    /// Create a client for the given region using the default credential chain
    ///
    /// Credentials are resolved eagerly so that a missing or broken credential
    /// setup is reported as a configuration error before any API call.
    pub async fn connect(region: &str) -> Result<Self, ProvisionError> {
        if region.is_empty() {
            return Err(ProvisionError::Configuration(
                "AWS region must not be empty".to_string(),
            ));
        }

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        let credentials = aws_config.credentials_provider().ok_or_else(|| {
            ProvisionError::Configuration("No AWS credentials provider available".to_string())
        })?;
        credentials
            .provide_credentials()
            .await
            .map_err(|e| ProvisionError::Configuration(format!("{}", e)))?;

        debug!("AWS client configured for region {}", region);

        Ok(Self::from_client(EcrClient::new(&aws_config)))
    }

    pub fn from_client(client: EcrClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegistryClient for EcrRegistry {
    async fn describe_repository(&self, name: &RepositoryName) -> Result<(), RegistryError> {
        match self
            .client
            .describe_repositories()
            .repository_names(name.as_str())
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                if let Some(service_err) = err.as_service_error() {
                    if service_err.is_repository_not_found_exception() {
                        return Err(RegistryError::NotFound);
                    }
                }
                Err(unrecognized_error(&err))
            }
        }
    }

    async fn create_repository(&self, name: &RepositoryName) -> Result<(), RegistryError> {
        match self
            .client
            .create_repository()
            .repository_name(name.as_str())
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                if let Some(service_err) = err.as_service_error() {
                    if service_err.is_repository_already_exists_exception() {
                        return Err(RegistryError::AlreadyExists);
                    }
                }
                Err(unrecognized_error(&err))
            }
        }
    }

    async fn set_repository_policy(
        &self,
        name: &RepositoryName,
        policy_text: &str,
    ) -> Result<(), RegistryError> {
        self.client
            .set_repository_policy()
            .repository_name(name.as_str())
            .policy_text(policy_text)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| unrecognized_error(&e))
    }

    async fn put_lifecycle_policy(
        &self,
        name: &RepositoryName,
        policy_text: &str,
    ) -> Result<(), RegistryError> {
        self.client
            .put_lifecycle_policy()
            .repository_name(name.as_str())
            .lifecycle_policy_text(policy_text)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| unrecognized_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    #[allow(dead_code)]
    struct FakeError {
        message: Option<String>,
    }

    #[test]
    fn test_format_sdk_error_extracts_message() {
        let err = FakeError {
            message: Some("The repository with name 'team/app' does not exist".to_string()),
        };
        assert_eq!(
            format_sdk_error(&err),
            "The repository with name 'team/app' does not exist"
        );
    }

    #[test]
    fn test_format_sdk_error_truncates_long_output() {
        let err = FakeError { message: None };
        let long = format!("{:?}{}", err, "x".repeat(300));
        let formatted = format_sdk_error(&long);
        assert!(formatted.ends_with("..."));
        assert_eq!(formatted.len(), 203);
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_region() {
        let result = EcrRegistry::connect("").await;
        assert!(matches!(result, Err(ProvisionError::Configuration(_))));
    }

    #[test]
    fn test_format_sdk_error_short_output_is_kept() {
        let err = FakeError { message: None };
        assert_eq!(format_sdk_error(&err), "FakeError { message: None }");
    }
}
