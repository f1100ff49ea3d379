//! Repository reference parsing

use crate::GitHubError;

/// An owner/name pair parsed from a github.com URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse `https://github.com/<owner>/<name>`, tolerating trailing
    /// slashes and `.git` clone suffixes.
    pub fn parse(url: &str) -> Result<Self, GitHubError> {
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.contains("github.com") {
            return Err(GitHubError::InvalidUrl(url.to_string()));
        }

        let mut parts = trimmed.rsplit('/');
        let name = parts.next().unwrap_or_default();
        let owner = parts.next().unwrap_or_default();
        let name = name.strip_suffix(".git").unwrap_or(name);

        if owner.is_empty() || name.is_empty() || owner.contains("github.com") {
            return Err(GitHubError::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
