//! HTTP client for the GitHub tree and raw-content APIs

use crate::repo::RepoRef;
use crate::GitHubError;
use async_trait::async_trait;
use repolens_core::{ContentFetcher, FetchFailure, NodeKind, TreeNode};
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("repolens/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    raw_base: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct RepoInfo {
    default_branch: Option<String>,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Option<Vec<TreeRecord>>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct TreeRecord {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    size: Option<u64>,
}

impl GitHubClient {
    /// Client against api.github.com, picking up `GITHUB_TOKEN` if set.
    pub fn new() -> Self {
        Self::with_bases(DEFAULT_API_BASE, DEFAULT_RAW_BASE)
    }

    /// Client against custom base URLs (used by tests)
    pub fn with_bases(api_base: &str, raw_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(url)
            .header("Accept", ACCEPT_HEADER)
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Resolve the repository's default branch ("main" vs "master" etc.)
    pub async fn default_branch(&self, repo: &RepoRef) -> Result<String, GitHubError> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name);
        let resp = self.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(GitHubError::Api {
                status: resp.status().as_u16(),
                message: format!("could not access repository {}", repo),
            });
        }
        let info: RepoInfo = resp
            .json()
            .await
            .map_err(|e| GitHubError::MalformedResponse(e.to_string()))?;
        Ok(info.default_branch.unwrap_or_else(|| "main".to_string()))
    }

    /// One recursive tree listing for a branch: paths, kinds, sizes.
    /// No pagination and no contents; `?recursive=1` returns the whole tree
    /// in a single call.
    pub async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Vec<TreeNode>, GitHubError> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, repo.owner, repo.name, branch
        );
        let resp = self.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(GitHubError::Api {
                status: resp.status().as_u16(),
                message: format!("could not fetch tree for {}@{}", repo, branch),
            });
        }
        let body: TreeResponse = resp
            .json()
            .await
            .map_err(|e| GitHubError::MalformedResponse(e.to_string()))?;
        map_tree(body)
    }

    /// Fetcher for raw file contents, pinned to one repo and branch
    pub fn content_fetcher(&self, repo: &RepoRef, branch: &str) -> RawFetcher {
        RawFetcher {
            http: self.http.clone(),
            base: format!("{}/{}/{}/{}", self.raw_base, repo.owner, repo.name, branch),
        }
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_tree(body: TreeResponse) -> Result<Vec<TreeNode>, GitHubError> {
    let records = match body.tree {
        Some(records) => records,
        None if body.truncated => return Err(GitHubError::TruncatedTree),
        None => {
            return Err(GitHubError::MalformedResponse(
                "tree field missing from listing".to_string(),
            ))
        }
    };
    if body.truncated {
        // Partial listing: proceed best-effort rather than failing the run
        tracing::warn!("tree listing truncated by upstream; continuing with partial tree");
    }

    Ok(records
        .into_iter()
        .filter_map(|record| {
            let kind = match record.kind.as_str() {
                "blob" => NodeKind::File,
                "tree" => NodeKind::Dir,
                // commit (submodule) and anything unknown is not fetchable
                _ => return None,
            };
            Some(TreeNode {
                path: record.path,
                kind,
                size: record.size,
            })
        })
        .collect())
}

/// Fetches raw file bytes from the content CDN. One request per path,
/// typed soft failures, no retries.
pub struct RawFetcher {
    http: reqwest::Client,
    base: String,
}

#[async_trait]
impl ContentFetcher for RawFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchFailure> {
        let url = format!("{}/{}", self.base, path);
        let resp = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        match resp.status() {
            status if status.as_u16() == 404 => Err(FetchFailure::NotFound),
            status if !status.is_success() => {
                Err(FetchFailure::Transport(format!("HTTP {} from {}", status, url)))
            }
            _ => resp
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| FetchFailure::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_tree_from_listing_json() {
        let body: TreeResponse = serde_json::from_str(
            r#"{
                "sha": "abc",
                "tree": [
                    {"path": "README.md", "type": "blob", "size": 1200, "sha": "x"},
                    {"path": "src", "type": "tree", "sha": "y"},
                    {"path": "src/main.rs", "type": "blob", "size": 900, "sha": "z"},
                    {"path": "sub", "type": "commit", "sha": "w"}
                ],
                "truncated": false
            }"#,
        )
        .unwrap();

        let nodes = map_tree(body).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], TreeNode::file("README.md", Some(1200)));
        assert_eq!(nodes[1].kind, NodeKind::Dir);
        assert_eq!(nodes[1].size, None);
        assert_eq!(nodes[2], TreeNode::file("src/main.rs", Some(900)));
    }

    #[test]
    fn test_map_tree_truncated_without_tree() {
        let body: TreeResponse =
            serde_json::from_str(r#"{"truncated": true}"#).unwrap();
        assert!(matches!(map_tree(body), Err(GitHubError::TruncatedTree)));
    }

    #[test]
    fn test_map_tree_missing_tree_is_malformed() {
        let body: TreeResponse = serde_json::from_str(r#"{"truncated": false}"#).unwrap();
        assert!(matches!(
            map_tree(body),
            Err(GitHubError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_map_tree_truncated_with_tree_is_best_effort() {
        let body: TreeResponse = serde_json::from_str(
            r#"{"tree": [{"path": "a.rs", "type": "blob", "size": 1}], "truncated": true}"#,
        )
        .unwrap();
        assert_eq!(map_tree(body).unwrap().len(), 1);
    }
}
