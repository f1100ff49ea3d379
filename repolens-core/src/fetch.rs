//! Content-fetching seam between the pipeline and its transport.

use async_trait::async_trait;
use serde::Serialize;

/// Why one selected path could not contribute content.
///
/// All variants are soft: the assembler records them per path and continues.
/// Timeouts and cancellations surface as `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchFailure {
    #[error("not found (removed since listing?)")]
    NotFound,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("content is not decodable as text")]
    NotText,
}

/// Retrieves raw bytes for one selected path.
///
/// Implemented by the upstream collaborator; the core only calls it. No
/// retries here — retry policy belongs to the implementor's own client.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchFailure>;
}
