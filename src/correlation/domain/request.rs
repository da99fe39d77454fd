//! Project and request identity value objects.

use super::{CorrelationDomainError, ProjectUrl, RequestNumber};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A hosted project: namespace, repository name and web URL.
///
/// The namespace may contain slashes (nested groups); the repository name
/// may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
    namespace: String,
    repo_name: String,
    project_url: ProjectUrl,
}

impl ProjectRef {
    /// Creates a project reference from raw values.
    ///
    /// # Errors
    ///
    /// Returns a [`CorrelationDomainError`] when the namespace is empty, the
    /// repository name is empty or contains `/`, or the URL is invalid.
    pub fn new(
        namespace: &str,
        repo_name: &str,
        project_url: &str,
    ) -> Result<Self, CorrelationDomainError> {
        let trimmed_namespace = namespace.trim().trim_matches('/');
        if trimmed_namespace.is_empty() {
            return Err(CorrelationDomainError::EmptyNamespace);
        }
        let repo = repo_name.trim();
        if repo.is_empty() || repo.contains('/') {
            return Err(CorrelationDomainError::InvalidRepoName(repo_name.to_owned()));
        }
        Ok(Self {
            namespace: trimmed_namespace.to_owned(),
            repo_name: repo.to_owned(),
            project_url: ProjectUrl::new(project_url)?,
        })
    }

    /// Returns the project namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Returns the project web URL.
    #[must_use]
    pub const fn project_url(&self) -> &ProjectUrl {
        &self.project_url
    }

    /// Returns `namespace/repo_name`.
    #[must_use]
    pub fn full_repo_name(&self) -> String {
        format!("{}/{}", self.namespace, self.repo_name)
    }
}

/// Identity of one merge/pull request on one hosting system.
///
/// Two identities are the same request when they share the project URL and
/// request number; [`Self::to_canonical`] produces that key.
///
/// # Examples
///
///     use hardly::correlation::domain::RequestIdentity;
///
///     let identity = RequestIdentity::from_parts(
///         "packit-service/src",
///         "open-vm-tools",
///         "https://gitlab.com/packit-service/src/open-vm-tools",
///         5,
///     )
///     .expect("valid identity");
///     assert_eq!(
///         identity.to_canonical(),
///         "https://gitlab.com/packit-service/src/open-vm-tools#5"
///     );
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestIdentity {
    project: ProjectRef,
    request_number: RequestNumber,
}

impl RequestIdentity {
    /// Creates an identity from validated components.
    #[must_use]
    pub const fn new(project: ProjectRef, request_number: RequestNumber) -> Self {
        Self {
            project,
            request_number,
        }
    }

    /// Creates an identity from raw external values.
    ///
    /// # Errors
    ///
    /// Returns a [`CorrelationDomainError`] when any component is invalid.
    pub fn from_parts(
        namespace: &str,
        repo_name: &str,
        project_url: &str,
        request_number: u64,
    ) -> Result<Self, CorrelationDomainError> {
        Ok(Self::new(
            ProjectRef::new(namespace, repo_name, project_url)?,
            RequestNumber::new(request_number)?,
        ))
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> &ProjectRef {
        &self.project
    }

    /// Returns the project namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.project.namespace()
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        self.project.repo_name()
    }

    /// Returns the project web URL.
    #[must_use]
    pub const fn project_url(&self) -> &ProjectUrl {
        self.project.project_url()
    }

    /// Returns the request number.
    #[must_use]
    pub const fn request_number(&self) -> RequestNumber {
        self.request_number
    }

    /// Produces the lookup key shared by all store adapters.
    #[must_use]
    pub fn to_canonical(&self) -> String {
        format!("{}#{}", self.project.project_url, self.request_number)
    }
}

impl fmt::Display for RequestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical())
    }
}
