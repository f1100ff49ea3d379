//! Fan-out content fetching and final context assembly.
//!
//! Fetches for distinct paths run concurrently behind a semaphore, each
//! under its own timeout, with an end-to-end deadline for the whole stage.
//! Every failure is recorded per path; the bundle is keyed by path in
//! selection order, so its shape is independent of completion order.

use crate::config::Config;
use crate::fetch::{ContentFetcher, FetchFailure};
use crate::select::Selection;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Outcome for one selected path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileContent {
    Text { text: String, truncated: bool },
    Failed { reason: FetchFailure },
}

impl FileContent {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BundleFile {
    pub path: String,
    pub content: FileContent,
}

/// Final artifact handed to the summarizer; immutable once assembled
#[derive(Debug, Clone, Serialize)]
pub struct ContextBundle {
    pub tree_text: String,
    pub files: Vec<BundleFile>,
    /// Some file content was shortened to fit the aggregate character cap
    pub truncated: bool,
    /// No selected file could be fetched; the bundle is tree-only
    pub degraded: bool,
}

pub async fn assemble(
    selection: &Selection,
    fetcher: Arc<dyn ContentFetcher>,
    tree_text: String,
    config: &Config,
) -> ContextBundle {
    let outcomes = fetch_all(selection, fetcher, config).await;

    // The tree text spends from the same aggregate cap as file contents,
    // and is itself cut to the cap when it alone would exceed it.
    let cap = config.assemble.max_context_chars;
    let mut truncated = false;
    let tree_text = if tree_text.chars().count() > cap {
        truncated = true;
        tree_text.chars().take(cap).collect()
    } else {
        tree_text
    };
    let mut budget = cap - tree_text.chars().count();

    let mut files = Vec::with_capacity(selection.chosen.len());
    for (candidate, outcome) in selection.chosen.iter().zip(outcomes) {
        let content = match outcome {
            Some(Ok(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => {
                    let chars = text.chars().count();
                    if chars <= budget {
                        budget -= chars;
                        FileContent::Text {
                            text,
                            truncated: false,
                        }
                    } else {
                        let cut: String = text.chars().take(budget).collect();
                        budget = 0;
                        truncated = true;
                        FileContent::Text {
                            text: cut,
                            truncated: true,
                        }
                    }
                }
                Err(_) => FileContent::Failed {
                    reason: FetchFailure::NotText,
                },
            },
            Some(Err(reason)) => FileContent::Failed { reason },
            None => FileContent::Failed {
                reason: FetchFailure::Transport("cancelled at request deadline".to_string()),
            },
        };
        files.push(BundleFile {
            path: candidate.node.path.clone(),
            content,
        });
    }

    let degraded = !files.is_empty() && !files.iter().any(|f| f.content.is_text());

    ContextBundle {
        tree_text,
        files,
        truncated,
        degraded,
    }
}

/// Bounded fan-out: one slot in the outcome vector per selected candidate.
/// `None` means the fetch was still pending when the deadline expired.
async fn fetch_all(
    selection: &Selection,
    fetcher: Arc<dyn ContentFetcher>,
    config: &Config,
) -> Vec<Option<Result<Vec<u8>, FetchFailure>>> {
    let deadline = Instant::now() + config.fetch_deadline();
    let per_fetch = config.fetch_timeout();
    let semaphore = Arc::new(Semaphore::new(config.fetch.concurrency));

    let mut join_set = JoinSet::new();
    for (idx, candidate) in selection.chosen.iter().enumerate() {
        let path = candidate.node.path.clone();
        let fetcher = Arc::clone(&fetcher);
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let outcome = match tokio::time::timeout(per_fetch, fetcher.fetch(&path)).await {
                Ok(result) => result,
                Err(_) => Err(FetchFailure::Transport(format!(
                    "fetch timed out after {:?}",
                    per_fetch
                ))),
            };
            (idx, outcome)
        });
    }

    let mut outcomes: Vec<Option<Result<Vec<u8>, FetchFailure>>> =
        (0..selection.chosen.len()).map(|_| None).collect();

    while !join_set.is_empty() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, join_set.join_next()).await {
            Ok(Some(Ok((idx, outcome)))) => outcomes[idx] = Some(outcome),
            Ok(Some(Err(_))) => {
                // Task aborted or panicked; its slot stays pending
            }
            Ok(None) => break,
            Err(_) => {
                join_set.abort_all();
                while join_set.join_next().await.is_some() {}
                break;
            }
        }
    }

    outcomes
}
