//! Error types for repolens operations

#[derive(Debug, thiserror::Error)]
pub enum RepoLensError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Glob pattern error: {0}")]
    GlobPattern(String),

    #[error("Tree listing is empty after filtering (nothing to summarize)")]
    EmptyListing,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
