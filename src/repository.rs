// Repository identifier normalization

use std::fmt;

/// Marker found in the host segment of ECR registry URLs
/// (e.g. "123456789012.dkr.ecr.eu-west-1.amazonaws.com")
const ECR_HOST_MARKER: &str = ".amazonaws.com";

/// Canonical repository name as passed to the registry API
///
/// No validation is performed here; an invalid name is rejected by ECR itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Normalize a bare repository name or a full ECR image reference
    ///
    /// # Example
    /// "123456789012.dkr.ecr.eu-west-1.amazonaws.com/team/app:latest" -> "team/app"
    /// "team/app/" -> "team/app"
    pub fn from_identifier(identifier: &str) -> Self {
        let trimmed = identifier.trim_end_matches('/');

        let mut segments: Vec<&str> = trimmed.split('/').collect();

        // Drop the tag from the last path component
        if let Some(last) = segments.last_mut() {
            let component: &str = *last;
            if let Some(pos) = component.find(':') {
                *last = &component[..pos];
            }
        }

        let path = if segments[0].contains(ECR_HOST_MARKER) {
            &segments[1..]
        } else {
            &segments[..]
        };

        Self(path.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RepositoryName {
    fn from(identifier: &str) -> Self {
        Self::from_identifier(identifier)
    }
}

impl AsRef<str> for RepositoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(identifier: &str) -> String {
        RepositoryName::from_identifier(identifier).to_string()
    }

    #[test]
    fn test_bare_name_is_unchanged() {
        assert_eq!(normalize("team/app"), "team/app");
        assert_eq!(normalize("app"), "app");
    }

    #[test]
    fn test_normalizing_twice_is_stable() {
        let once = normalize("123456789012.dkr.ecr.eu-west-1.amazonaws.com/team/app:v1");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_registry_host_is_stripped() {
        assert_eq!(
            normalize("123456789012.dkr.ecr.eu-west-1.amazonaws.com/team/app"),
            "team/app"
        );
    }

    #[test]
    fn test_registry_host_and_tag_are_stripped() {
        assert_eq!(
            normalize("123456789012.dkr.ecr.eu-west-1.amazonaws.com/team/app:latest"),
            "team/app"
        );
    }

    #[test]
    fn test_trailing_slashes_are_stripped() {
        assert_eq!(normalize("team/app/"), "team/app");
        assert_eq!(normalize("team/app//"), "team/app");
    }

    #[test]
    fn test_tag_is_stripped_without_registry_host() {
        assert_eq!(normalize("team/app:latest"), "team/app");
        assert_eq!(normalize("app:1.2.3"), "app");
    }

    #[test]
    fn test_tag_is_cut_at_first_colon() {
        assert_eq!(normalize("team/app:a:b"), "team/app");
    }

    #[test]
    fn test_non_ecr_host_is_kept() {
        // Only ECR hosts are recognized, anything else is treated as part of the name
        assert_eq!(normalize("ghcr.io/team/app:latest"), "ghcr.io/team/app");
    }

    #[test]
    fn test_registry_host_only_yields_empty_name() {
        assert_eq!(
            normalize("123456789012.dkr.ecr.eu-west-1.amazonaws.com/"),
            ""
        );
    }

    #[test]
    fn test_empty_identifier() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("///"), "");
    }
}
