//! GitHub collaborators for the repolens pipeline: one tree listing per
//! request and raw content retrieval for selected paths.

pub mod client;
pub mod repo;

pub use client::{GitHubClient, RawFetcher};
pub use repo::RepoRef;

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("Invalid GitHub URL: {0}")]
    InvalidUrl(String),

    #[error("GitHub API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Repository tree is too large (listing truncated with no entries)")]
    TruncatedTree,

    #[error("Malformed response from GitHub: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
